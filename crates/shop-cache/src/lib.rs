//! Key-value persistence for the storefront.
//!
//! The storefront keeps its client-side state (the cart) in a small
//! string-keyed store, the same way a browser keeps it in local storage.
//! This crate provides that port plus typed JSON access on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart", &vec![Line { id: "a".into(), quantity: 1 }])?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<Line>> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
