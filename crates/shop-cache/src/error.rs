use thiserror::Error;

/// Storage failures surfaced by a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing document could not be opened, e.g. the path is a directory.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// A value or the backing document was not valid JSON.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The store is unusable, e.g. a poisoned lock.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
