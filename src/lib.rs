//! Durable Cache - a bounded, persistent key-value cache
//!
//! Provides LRU eviction, lazy TTL expiration, atomic on-disk snapshots and
//! function memoization, plus an HTTP front-end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{CacheError, PersistenceError};
pub use memo::{Kwargs, MemoKey};
