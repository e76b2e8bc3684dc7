//! Persistence Module
//!
//! Writes the ordered entry collection to disk and reads it back at startup.
//!
//! The snapshot is a JSON array of `[key, {"value": .., "expiry": ..}]` pairs,
//! least recently used first. Every write goes to a temporary file in the
//! target's directory which is then renamed over the target, so readers only
//! ever see a complete snapshot.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::cache::entry::{current_timestamp, CacheEntry};
use crate::error::PersistenceError;

// == Persistence ==
/// Snapshot file manager for a single cache instance.
#[derive(Debug, Clone)]
pub struct Persistence {
    path: PathBuf,
}

impl Persistence {
    // == Constructor ==
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Save ==
    /// Writes a snapshot, logging instead of returning any failure.
    ///
    /// Returns `true` when the snapshot was swapped into place.
    pub fn save<K: Serialize + DeserializeOwned, V: Serialize + DeserializeOwned>(
        &self,
        entries: &[(&K, &CacheEntry<V>)],
    ) -> bool {
        match self.try_save(entries) {
            Ok(written) => {
                debug!(path = %self.path.display(), entries = written, "Cache snapshot written");
                true
            }
            Err(e) => {
                error!("Error saving cache: {}", e);
                false
            }
        }
    }

    /// Writes a snapshot of `entries` (oldest first).
    ///
    /// Entries that cannot be serialized, or whose JSON would not read back
    /// as the same types, are skipped with a warning; the rest are still
    /// written. Returns the number of entries written.
    pub fn try_save<K: Serialize + DeserializeOwned, V: Serialize + DeserializeOwned>(
        &self,
        entries: &[(&K, &CacheEntry<V>)],
    ) -> Result<usize, PersistenceError> {
        let records = encode_records(entries);
        let temp = self.write_temp(&records)?;
        self.commit(temp)?;
        Ok(records.len())
    }

    /// Writes the encoded records to a fresh temporary file beside the target.
    ///
    /// The temporary file is deleted when the returned handle is dropped
    /// without being committed.
    pub(crate) fn write_temp(
        &self,
        records: &[serde_json::Value],
    ) -> Result<NamedTempFile, PersistenceError> {
        let bytes = serde_json::to_vec(records)?;
        let write_err = |source: io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(self.parent_dir()).map_err(write_err)?;
        temp.write_all(&bytes).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        Ok(temp)
    }

    /// Atomically replaces the target with a fully written temporary file.
    pub(crate) fn commit(&self, temp: NamedTempFile) -> Result<(), PersistenceError> {
        // On failure the PersistError still owns the temp file; dropping it
        // removes the orphan.
        temp.persist(&self.path)
            .map(|_| ())
            .map_err(|e| PersistenceError::Replace {
                path: self.path.clone(),
                source: e.error,
            })
    }

    // == Load ==
    /// Reads the snapshot, keeping only entries that are still live.
    ///
    /// Missing, unreadable or corrupt files yield an empty set. A record that
    /// does not decode is skipped on its own. Expired entries are dropped
    /// without rewriting the file.
    pub fn load<K: DeserializeOwned, V: DeserializeOwned>(&self) -> Vec<(K, CacheEntry<V>)> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Error loading cache, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    pub fn try_load<K: DeserializeOwned, V: DeserializeOwned>(
        &self,
    ) -> Result<Vec<(K, CacheEntry<V>)>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cache snapshot found");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: Vec<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let stored = records.len();
        let decoded: Vec<(K, CacheEntry<V>)> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!(path = %self.path.display(), "Skipping unreadable cache entry: {}", e);
                    None
                }
            })
            .collect();
        let unreadable = stored - decoded.len();

        let now = current_timestamp();
        let live: Vec<_> = decoded
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .collect();

        info!(
            "Loaded {} cache entries from {} ({} expired, {} unreadable entries dropped)",
            live.len(),
            self.path.display(),
            stored - unreadable - live.len(),
            unreadable
        );
        Ok(live)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// Serializes each pair on its own so one bad value cannot sink the snapshot.
///
/// serde_json writes non-finite floats as `null` without complaint, so every
/// record is decoded once more and dropped if it no longer reads back.
fn encode_records<K, V>(entries: &[(&K, &CacheEntry<V>)]) -> Vec<serde_json::Value>
where
    K: Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    entries
        .iter()
        .filter_map(|(key, entry)| {
            let record = match serde_json::to_value((key, entry)) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping cache entry that cannot be serialized: {}", e);
                    return None;
                }
            };
            match serde_json::from_value::<(K, CacheEntry<V>)>(record.clone()) {
                Ok(_) => Some(record),
                Err(e) => {
                    warn!("Skipping cache entry that does not read back: {}", e);
                    None
                }
            }
        })
        .collect()
}
