//! Durable key-value storage for the language preference
//!
//! The controller only ever reads and writes one key, but the store is
//! keyed so the same file can be shared with other page settings.

use crate::error::{I18nError, I18nResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key under which the preferred locale is persisted
pub const DEFAULT_STORAGE_KEY: &str = "tablonaute-lang";

pub trait PreferenceStore {
    /// Stored value for `key`, or `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> I18nResult<()>;
}

/// In-process store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> I18nResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk
///
/// Every `set` rewrites the file. A missing or corrupt file reads as empty,
/// and non-string values in it are ignored.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Map<String, Value> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable preference file");
                Map::new()
            }
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> I18nResult<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), Value::String(value.to_string()));

        let body = serde_json::to_string_pretty(&Value::Object(values))
            .map_err(|e| I18nError::Storage(e.to_string()))?;
        std::fs::write(&self.path, body).map_err(|source| I18nError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}
