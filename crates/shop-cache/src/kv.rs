//! Key-value port and typed wrapper with automatic serialization.

use std::sync::Arc;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// A string-keyed, string-valued store.
///
/// Implementations must make `set` and `delete` visible to the next `get`
/// on the same instance before returning.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// text is not valid JSON for `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<Line>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => {
                let value: T = serde_json::from_str(&raw)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
