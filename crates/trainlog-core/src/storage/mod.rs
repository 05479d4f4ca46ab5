//! Persistence gateway.
//!
//! State is organized as independent logical records, each round-tripping
//! through the gateway as one JSON value under a string key. The gateway
//! never inspects contents; each `save` is one atomic-per-record write
//! and there is no multi-key transaction.
//!
//! A corrupted or unparsable record is treated as absent -- callers fall
//! back to empty/default state rather than failing to start.

mod config;

pub use config::{Config, NotificationsConfig, TimerConfig};

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// Storage keys for the persisted records.
pub mod keys {
    pub const ACTIVE_SESSION: &str = "activeSession";
    pub const SESSIONS: &str = "sessions";
    pub const PRS: &str = "prs";
    pub const SKILLS: &str = "skills";
    pub const CHECKLIST: &str = "checklist";
}

/// Key-value store for JSON records.
///
/// `load` returns `None` both for missing and for undecodable data; the
/// core's defensive default-on-parse-failure policy lives behind this.
pub trait StateStore {
    fn load(&self, key: &str) -> Option<serde_json::Value>;
    fn save(&mut self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;
}

/// Returns `~/.config/trainlog[-dev]/` based on TRAINLOG_ENV.
///
/// Set TRAINLOG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TRAINLOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("trainlog-dev")
    } else {
        base_dir.join("trainlog")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// File-backed store: one `<key>.json` per record in a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open the default store under the data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open a store rooted at an explicit directory (tests, custom homes).
    pub fn at(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for JsonStore {
    fn load(&self, key: &str) -> Option<serde_json::Value> {
        let content = std::fs::read_to_string(self.path_for(key)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save(&mut self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::EncodeFailed {
                key: key.to_string(),
                source,
            })?;
        let path = self.path_for(key);
        std::fs::write(&path, content).map_err(|source| StorageError::WriteFailed {
            key: key.to_string(),
            path,
            source,
        })
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, serde_json::Value>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves observed, across all keys. Tests use this to
    /// check that no-op operations do not persist.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<serde_json::Value> {
        self.records.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.saves += 1;
        self.records.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load("missing").is_none());
        store.save("k", &json!({"a": 1})).unwrap();
        assert_eq!(store.load("k"), Some(json!({"a": 1})));
    }

    #[test]
    fn json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::at(dir.path().to_path_buf()).unwrap();
        store.save(keys::SESSIONS, &json!([{"id": "x"}])).unwrap();
        assert_eq!(store.load(keys::SESSIONS), Some(json!([{"id": "x"}])));
    }

    #[test]
    fn corrupted_record_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::at(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("activeSession.json"), "{not json").unwrap();
        assert!(store.load(keys::ACTIVE_SESSION).is_none());
    }
}
