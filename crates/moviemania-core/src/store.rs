use moviemania_config::is_valid_store_key;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize value for key {key:?}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid store key {0:?}: use letters, digits, '-' or '_'")]
    InvalidKey(String),
}

/// Persistent string-keyed storage
pub trait KeyValueStore: Send {
    /// `Ok(None)` when nothing is stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if is_valid_store_key(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// One `<key>.json` file per key inside a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map, so a test can hand one clone
/// to a session and inspect or reload from the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert_raw(key, value);
        Ok(())
    }
}

/// Read and decode the value under `key`.
///
/// Missing keys, unreadable storage and undecodable data all yield `default`.
pub fn load_value<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for {:?}, using default", key);
            return default;
        }
        Err(e) => {
            warn!("Failed to read stored value for {:?}: {}. Using default.", key, e);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored value for {:?} could not be decoded ({}). Treating it as absent.", key, e);
            default
        }
    }
}

/// Encode `value` and write it under `key`
pub fn save_value<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &encoded)
}

/// A value loaded once from a store and written back on every change
pub struct Persisted<T> {
    store: Box<dyn KeyValueStore>,
    key: String,
    value: T,
}

impl<T: Serialize + DeserializeOwned> Persisted<T> {
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = load_value(store.as_ref(), &key, default);
        Self { store, key, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it through.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, value: T) -> Result<(), StoreError> {
        self.value = value;
        save_value(self.store.as_mut(), &self.key, &self.value)
    }

    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<(), StoreError> {
        let next = f(&self.value);
        self.set(next)
    }
}
