//! Cache Module
//!
//! Bounded LRU cache with lazy TTL expiration and crash-safe persistence.

mod durable;
mod entry;
mod lru;
mod persistence;
mod stats;
mod store;


use std::hash::Hash;

use serde::{de::DeserializeOwned, Serialize};

// Re-export public types
pub use durable::Cache;
pub use entry::{current_timestamp, CacheEntry};
pub use lru::LruTracker;
pub use persistence::Persistence;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Key and Value Bounds ==
/// Anything usable as a cache key: hashable, comparable and persistable.
pub trait CacheKey: Eq + Hash + Clone + Serialize + DeserializeOwned {}

impl<T> CacheKey for T where T: Eq + Hash + Clone + Serialize + DeserializeOwned {}

/// Anything usable as a cache value: cloneable out of the cache and persistable.
pub trait CacheValue: Clone + Serialize + DeserializeOwned {}

impl<T> CacheValue for T where T: Clone + Serialize + DeserializeOwned {}
