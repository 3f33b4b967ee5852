//! Key-value persistence for the username

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};

/// Key under which the username is persisted
pub const USERNAME_KEY: &str = "username";

/// String key-value store injected into the controller
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value synchronously
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Process-local store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock memory store: {}", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk, rewritten on every write
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read store {}: {}", path.display(), e))?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)
                    .map_err(|e| format!("Failed to parse store {}: {}", path.display(), e))?
            }
        } else {
            debug!("Store file {} does not exist yet, starting empty", path.display());
            HashMap::new()
        };

        info!("Opened key-value store at {} ({} entries)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock file store: {}", e))?;

        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());

        let encoded = serde_json::to_string_pretty(&updated)
            .map_err(|e| format!("Failed to encode store: {}", e))?;

        // Write beside the target and rename so the file is never half-written
        let staging = self.staging_path();
        fs::write(&staging, encoded)
            .map_err(|e| format!("Failed to write store {}: {}", staging.display(), e))?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(format!("Failed to replace store {}: {}", self.path.display(), e));
        }

        *entries = updated;
        debug!("Persisted key {} to {}", key, self.path.display());
        Ok(())
    }
}
