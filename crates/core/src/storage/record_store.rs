use std::collections::HashMap;

use serde_json::Value;

use crate::errors::CoreError;

/// Durable key-value storage for per-user records.
///
/// Every `save` overwrites the whole value under `key` (last write wins);
/// there are no partial writes or transactions.
pub trait RecordStore {
    /// Read the value stored under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<Value>, CoreError>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: Value) -> Result<(), CoreError>;
}

/// Record store kept in memory as serialized JSON text, the same shape a
/// browser's local storage holds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON text under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store raw text under `key` without validation (e.g. to seed legacy data).
    pub fn insert_raw(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RecordStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, CoreError> {
        let Some(text) = self.entries.get(key) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(text)?))
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), CoreError> {
        let text = serde_json::to_string(&value)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize value for '{key}': {e}")))?;
        self.entries.insert(key.to_string(), text);
        Ok(())
    }
}
