//! Cache Entry Module
//!
//! Defines the value/expiry pair stored for every key.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A single cached value and the instant it stops being valid.
///
/// Entries are never mutated in place: a refresh replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix seconds, fractional)
    pub expiry: f64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expiry: current_timestamp() + ttl.as_secs_f64(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at the given instant.
    ///
    /// Boundary condition: an entry whose expiry equals `now` is expired.
    pub fn is_expired_at(&self, now: f64) -> bool {
        self.expiry <= now
    }

    /// Checks whether the entry is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        let remaining = self.expiry - current_timestamp();
        if remaining > 0.0 {
            Duration::try_from_secs_f64(remaining).unwrap_or_default()
        } else {
            Duration::ZERO
        }
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in fractional seconds.
pub fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
