use std::collections::HashMap;

use super::Storage;
use crate::error::CoreError;

/// In-memory storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one slot, e.g. a snapshot left by an earlier session.
    pub fn with_slot(key: impl Into<String>, data: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), data.into());
        Self { slots }
    }

    /// Raw value under `key`, bypassing the `Result` of [`Storage::load`].
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError> {
        self.slots.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.slots.remove(key);
        Ok(())
    }
}
