//! Persisted key-value storage with expiry, and the override map kept in it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::warn;

/// Persisted selection: route key to fixture name. Only non-empty entries.
pub type OverrideMap = BTreeMap<String, String>;

/// Storage error
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file could not be read or written
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Stored entry could not be encoded or decoded
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store whose entries expire.
pub trait StateStore {
    /// Current value for `key`, `None` when absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value and expiry.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    /// `None` when the TTL is too large to represent
    expires_at: Option<Instant>,
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at.map_or(true, |at| Instant::now() < at) => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let entry = MemoryEntry {
            value: value.to_owned(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), entry);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    /// Unix timestamp (seconds) after which the entry is gone
    expires_at: u64,
}

/// Store keeping one JSON file per key under a directory.
///
/// Survives process restarts, so selections outlive a single server run.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let entry: FileEntry = serde_json::from_str(&content)?;
        if unix_now() >= entry.expires_at {
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let entry = FileEntry {
            value: value.to_owned(),
            expires_at: unix_now().saturating_add(ttl.as_secs()),
        };
        let path = self.entry_path(key);
        std::fs::write(&path, serde_json::to_vec(&entry)?)
            .map_err(|source| StoreError::Io { path, source })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Read the override map stored under `key`.
///
/// Missing, expired, unreadable or garbled entries all read as an empty map.
pub fn read_override_map(store: &dyn StateStore, key: &str) -> OverrideMap {
    let blob = match store.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return OverrideMap::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read override map");
            return OverrideMap::new();
        }
    };

    match serde_json::from_str::<OverrideMap>(&blob) {
        Ok(map) => map.into_iter().filter(|(_, v)| !v.is_empty()).collect(),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed override map");
            OverrideMap::new()
        }
    }
}

/// Overwrite the override map stored under `key`, dropping empty selections.
pub fn write_override_map(
    store: &dyn StateStore,
    key: &str,
    map: &OverrideMap,
    ttl: Duration,
) -> Result<(), StoreError> {
    let kept: OverrideMap = map
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let blob = serde_json::to_string(&kept)?;
    store.set(key, &blob, ttl)
}
