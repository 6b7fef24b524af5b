//! JSON-file store, the native stand-in for browser local storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{CacheError, KeyValueStore};

/// A [`KeyValueStore`] persisted as a single JSON object on disk.
///
/// Every write replaces the file through a temporary sibling and a rename,
/// so a reader never observes a half-written document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store backed by `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if path.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current entries for a read-modify-write. Only a document that fails to
    /// parse is replaced; I/O failures abort the write so other keys survive.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match self.read_all() {
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "replacing corrupt store");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), keys = entries.len(), "store flushed");
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, CacheError> {
        self.lock
            .lock()
            .map_err(|_| CacheError::StoreError("file store lock poisoned".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let _guard = self.guard()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let _guard = self.guard()?;
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _guard = self.guard()?;
        let mut entries = self.read_for_update()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
