//! Durable Cache Module
//!
//! Thread-safe handle around [`CacheStore`]. One exclusive lock per instance
//! covers every operation end to end, including the snapshot write, so the
//! size bound and recency order hold under any interleaving of callers.

use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheKey, CacheStats, CacheStore, CacheValue, Persistence};
use crate::config::Config;
use crate::error::Result;

// == Cache ==
/// Shareable cache instance (`Send + Sync`, typically held in an `Arc`).
///
/// Dropping the cache writes a final snapshot, on normal exit and during
/// unwinding alike.
#[derive(Debug)]
pub struct Cache<K: CacheKey, V: CacheValue> {
    store: Mutex<CacheStore<K, V>>,
}

impl<K: CacheKey, V: CacheValue> Cache<K, V> {
    // == Constructors ==
    /// Opens a cache backed by `config.persistence_file`.
    ///
    /// Only an invalid configuration is an error; a missing or damaged
    /// snapshot just means starting empty.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let persistence = Persistence::new(&config.persistence_file);
        let store = CacheStore::with_persistence(config.max_size, config.ttl, persistence);
        info!(
            "Cache opened: max_size={}, ttl={:?}, file={}, entries={}",
            config.max_size,
            config.ttl,
            config.persistence_file.display(),
            store.len()
        );
        Ok(Self::from_store(store))
    }

    /// Creates a cache that is never written to disk.
    pub fn in_memory(max_size: usize, ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(max_size, ttl))
    }

    pub fn from_store(store: CacheStore<K, V>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    // == Operations ==
    /// Returns the live value for `key`, refreshing its recency.
    pub fn get(&self, key: &K) -> Option<V> {
        self.store.lock().get(key)
    }

    /// Stores `value` with the configured TTL.
    pub fn put(&self, key: K, value: V) {
        self.store.lock().put(key, value);
    }

    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.store.lock().put_with_ttl(key, value, ttl);
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.store.lock().remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    /// Writes a snapshot now. Returns false if the write failed.
    pub fn flush(&self) -> bool {
        self.store.lock().flush()
    }

    // == Inspection ==
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().keys()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }
}

impl<K: CacheKey, V: CacheValue> Drop for Cache<K, V> {
    fn drop(&mut self) {
        let store = self.store.get_mut();
        if let Some(persistence) = store.persistence() {
            debug!(path = %persistence.path().display(), "Flushing cache on drop");
            store.flush();
        }
    }
}
