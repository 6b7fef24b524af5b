//! In-process store, used for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{CacheError, KeyValueStore};

/// A [`KeyValueStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> CacheError {
        CacheError::StoreError("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_memory_store_delete_absent_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("missing").is_ok());
        assert!(!store.exists("missing").unwrap());
    }
}
