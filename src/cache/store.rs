//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, lazy TTL
//! expiration and write-through persistence.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::current_timestamp;
use crate::cache::{CacheEntry, CacheKey, CacheStats, CacheValue, LruTracker, Persistence};

// == Cache Store ==
/// Unsynchronized cache engine. Wrap it in [`crate::cache::Cache`] to share it.
///
/// Every mutation (insert, refresh, eviction, lazy expiry, removal) writes a
/// full snapshot when a snapshot file is configured.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Lifetime given to entries stored with `put`
    ttl: Duration,
    /// Snapshot target, None for a purely in-memory cache
    persistence: Option<Persistence>,
}

impl<K: CacheKey, V: CacheValue> CacheStore<K, V> {
    // == Constructors ==
    /// Creates an in-memory store that never touches disk.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_size,
            ttl,
            persistence: None,
        }
    }

    /// Creates a store backed by a snapshot file, seeded with its live entries.
    ///
    /// Loading never fails and never rewrites the file.
    pub fn with_persistence(max_size: usize, ttl: Duration, persistence: Persistence) -> Self {
        let mut store = Self::new(max_size, ttl);
        for (key, entry) in persistence.load::<K, V>() {
            store.lru.touch(&key);
            store.entries.insert(key, entry);
        }
        // A snapshot written under a larger bound may hold too many entries.
        while store.entries.len() > store.max_size {
            match store.lru.evict_oldest() {
                Some(oldest) => {
                    store.entries.remove(&oldest);
                }
                None => break,
            }
        }
        store.stats.set_total_entries(store.entries.len());
        store.persistence = Some(persistence);
        store
    }

    // == Get ==
    /// Retrieves a live value and marks it most recently used.
    ///
    /// An expired entry is removed (and the removal persisted) on discovery.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = current_timestamp();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            self.persist();
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores a value with the configured TTL.
    pub fn put(&mut self, key: K, value: V) {
        self.put_with_ttl(key, value, self.ttl);
    }

    /// Stores a value with an explicit TTL.
    ///
    /// The entry becomes most recently used; if the bound is exceeded exactly
    /// one least recently used entry is evicted.
    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);

        if self.entries.len() > self.max_size {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Evicted least recently used entry");
            }
        }

        self.stats.set_total_entries(self.entries.len());
        self.persist();
    }

    // == Remove ==
    /// Removes an entry, returning its value if it was still live.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
        self.persist();

        if entry.is_expired() {
            self.stats.record_expiration();
            None
        } else {
            Some(entry.value)
        }
    }

    // == Contains ==
    /// Checks for a live entry without touching recency.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Flush ==
    /// Persists the current state. Returns false if the write failed.
    pub fn flush(&mut self) -> bool {
        self.persist()
    }

    // == Snapshot ==
    /// Entries from least to most recently used.
    pub fn ordered_entries(&self) -> Vec<(&K, &CacheEntry<V>)> {
        self.lru
            .iter_oldest_first()
            .filter_map(|key| self.entries.get(key).map(|entry| (key, entry)))
            .collect()
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.lru.iter_oldest_first().cloned().collect()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn persistence(&self) -> Option<&Persistence> {
        self.persistence.as_ref()
    }

    fn persist(&mut self) -> bool {
        let saved = match &self.persistence {
            Some(persistence) => persistence.save(&self.ordered_entries()),
            None => return true,
        };
        if !saved {
            self.stats.record_persist_failure();
        }
        saved
    }
}
