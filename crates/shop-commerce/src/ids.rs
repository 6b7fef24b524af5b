//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ReviewId where a ProductId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A remote-assigned identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check for an empty identifier.
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(ReviewId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("f7bdd538-3914-409d-bd71-8ef962a9a9dd");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""f7bdd538-3914-409d-bd71-8ef962a9a9dd""#
        );
        let back: ProductId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(back.as_str(), "abc");
    }

    #[test]
    fn test_empty_id() {
        assert!(ProductId::new("  ").is_empty());
        assert!(!ProductId::from("a").is_empty());
    }
}
