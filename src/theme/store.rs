use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preference file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Small persistent key-value store for UI preferences.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Preferences kept as one JSON object on disk. Keys this app does not know
/// about are kept as-is when the file is rewritten.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                tracing::warn!("Ignoring preferences at {}: {}", path.display(), e);
                Map::new()
            }
        };
        Self { path, values }
    }

    fn read(path: &Path) -> Result<Map<String, Value>, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Non-persistent store, used when no config directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
