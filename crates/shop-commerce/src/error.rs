//! Commerce error types.

use shop_cache::CacheError;
use shop_data::FetchError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Transport or connectivity failure, including non-2xx catalog listings.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a shape we could not decode.
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// The remote reports the requested resource as missing.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Local persistence failed. Always recovered inside the cart store.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CommerceError {
    /// The single message a page shows in place of its content.
    pub fn user_message(&self) -> &'static str {
        match self {
            CommerceError::NotFound(_) => "Product not found",
            CommerceError::Network(_) | CommerceError::Parse(_) => {
                "Failed to load products. Please try again later."
            }
            CommerceError::Storage(_) => "Your cart could not be saved.",
        }
    }
}

impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::ParseError(msg) => CommerceError::Parse(msg),
            other => CommerceError::Network(other.to_string()),
        }
    }
}

impl From<CacheError> for CommerceError {
    fn from(e: CacheError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Parse(e.to_string())
    }
}
