//! Key-value stores with per-entry expiry
//!
//! Values are JSON documents stored under string keys. Each entry may carry an
//! expiry instant; expired entries read as absent and are dropped the next
//! time the store is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A stored value and when it stops being valid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: serde_json::Value,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    pub fn new(value: serde_json::Value, ttl: Option<Duration>) -> Self {
        let expires_at = ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        Self { value, expires_at }
    }

    /// Check whether the entry has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if now >= expiry)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Minimal key-value persistence used by the bake session
pub trait KeyValueStore {
    /// Read a value; missing and expired keys both read as `None`
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: serde_json::Value, ttl: Option<Duration>)
        -> StoreResult<()>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-memory store, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw entry, bypassing TTL handling
    pub fn insert_entry(&mut self, key: impl Into<String>, entry: StoredEntry) {
        self.entries.insert(key.into(), entry);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        Ok(self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    fn set(
        &mut self,
        key: &str,
        value: serde_json::Value,
        ttl: Option<Duration>,
    ) -> StoreResult<()> {
        let now = Utc::now();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        self.entries
            .insert(key.to_string(), StoredEntry::new(value, ttl));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON file store holding the entries of one session
///
/// Every write goes to a temporary file first and is renamed into place. A
/// file that cannot be parsed is moved aside and the session starts empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store for `session` inside `root`, creating the directory if needed
    pub fn open(root: &Path, session: &str) -> StoreResult<Self> {
        fs::create_dir_all(root).map_err(|e| StoreError::io(root, e))?;
        Ok(Self {
            path: root.join(format!("{}.json", session)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StoreResult<BTreeMap<String, StoredEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = self
                    .path
                    .with_extension(format!("json.corrupted.{}", Utc::now().timestamp()));
                fs::rename(&self.path, &backup).map_err(|e| StoreError::io(&self.path, e))?;
                warn!(
                    "Session file corrupted ({}), backed up to {}",
                    e,
                    backup.display()
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, StoredEntry>) -> StoreResult<()> {
        let temp_file = self
            .path
            .with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4()));
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&temp_file, json).map_err(|e| StoreError::io(&temp_file, e))?;
        if let Err(e) = fs::rename(&temp_file, &self.path) {
            let _ = fs::remove_file(&temp_file);
            return Err(StoreError::io(&self.path, e));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    fn set(
        &mut self,
        key: &str,
        value: serde_json::Value,
        ttl: Option<Duration>,
    ) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        let now = Utc::now();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        entries.insert(key.to_string(), StoredEntry::new(value, ttl));
        self.write_entries(&entries)?;
        debug!("Stored '{}' in {}", key, self.path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        let now = Utc::now();
        entries.retain(|k, entry| k != key && !entry.is_expired_at(now));
        if entries.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::io(&self.path, e)),
            }
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const MONTH: Duration = Duration::from_secs(30 * 24 * 60 * 60);

    #[test]
    fn test_entry_expiry_boundary() {
        let entry = StoredEntry::new(json!(1), Some(Duration::from_secs(60)));
        let expiry = entry.expires_at.unwrap();

        assert!(!entry.is_expired_at(expiry - chrono::Duration::seconds(1)));
        assert!(entry.is_expired_at(expiry));
        assert!(!StoredEntry::new(json!(1), None).is_expired());
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("bake_inputs").unwrap().is_none());

        store.set("bake_inputs", json!({"a": 1}), Some(MONTH)).unwrap();
        assert_eq!(store.get("bake_inputs").unwrap(), Some(json!({"a": 1})));

        store.remove("bake_inputs").unwrap();
        assert!(store.get("bake_inputs").unwrap().is_none());
        store.remove("bake_inputs").unwrap();
    }

    #[test]
    fn test_memory_store_hides_expired_entries() {
        let mut store = MemoryStore::new();
        store.insert_entry(
            "old",
            StoredEntry {
                value: json!("stale"),
                expires_at: Some(Utc::now() - chrono::Duration::days(1)),
            },
        );
        assert!(store.get("old").unwrap().is_none());

        store.set("fresh", json!(1), None).unwrap();
        assert!(!store.entries.contains_key("old"));
        assert!(store.entries.contains_key("fresh"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::open(temp_dir.path(), "kitchen").unwrap();
            store.set("bake_inputs", json!({"cold_proof": true}), Some(MONTH)).unwrap();
        }

        let store = FileStore::open(temp_dir.path(), "kitchen").unwrap();
        assert_eq!(
            store.get("bake_inputs").unwrap(),
            Some(json!({"cold_proof": true}))
        );
        assert!(store.path().ends_with("kitchen.json"));
    }

    #[test]
    fn test_file_store_sessions_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let mut first = FileStore::open(temp_dir.path(), "first").unwrap();
        first.set("bake_inputs", json!(1), None).unwrap();

        let second = FileStore::open(temp_dir.path(), "second").unwrap();
        assert!(second.get("bake_inputs").unwrap().is_none());
    }

    #[test]
    fn test_file_store_remove_last_key_deletes_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path(), "default").unwrap();
        store.set("bake_inputs", json!(1), None).unwrap();
        assert!(store.path().exists());

        store.remove("bake_inputs").unwrap();
        assert!(!store.path().exists());
        assert!(store.get("bake_inputs").unwrap().is_none());
    }

    #[test]
    fn test_file_store_drops_expired_entries_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path(), "default").unwrap();
        let mut entries = BTreeMap::new();
        entries.insert(
            "old".to_string(),
            StoredEntry {
                value: json!("stale"),
                expires_at: Some(Utc::now() - chrono::Duration::days(1)),
            },
        );
        store.write_entries(&entries).unwrap();

        store.set("fresh", json!(2), None).unwrap();
        let on_disk = store.read_entries().unwrap();
        assert!(!on_disk.contains_key("old"));
        assert!(on_disk.contains_key("fresh"));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path(), "default").unwrap();
        // A non-empty directory in place of the session file makes the rename fail
        fs::create_dir_all(store.path().join("occupied")).unwrap();

        assert!(store.write_entries(&BTreeMap::new()).is_err());
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_file_store_recovers_from_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path(), "default").unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.get("bake_inputs").unwrap().is_none());
        assert!(!store.path().exists());

        let backups: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("corrupted"))
            .collect();
        assert_eq!(backups.len(), 1);
    }
}
