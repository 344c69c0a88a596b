//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            ///
            /// Surrounding whitespace is stripped before the emptiness check.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if trimmed.len() == id.len() {
                    Ok(Self(id))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated athlete identifier.
    ///
    /// Player IDs are the roster sheet's `id` column and must be non-empty.
    PlayerId, "player ID"
);

define_string_id!(
    /// A validated result record identifier (UUID v4 for records written by `rr`).
    RecordId, "record ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_rejected() {
        let err = PlayerId::new("").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "player ID" });
        assert_eq!(err.to_string(), "player ID cannot be empty");
    }

    #[test]
    fn whitespace_only_id_rejected() {
        assert!(RecordId::new("   ").is_err());
    }

    #[test]
    fn id_is_trimmed() {
        let id = PlayerId::new("  p-001 ").unwrap();
        assert_eq!(id.as_str(), "p-001");
    }

    #[test]
    fn id_serde_roundtrip_and_validation() {
        let id = PlayerId::new("p-001").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""p-001""#);

        let parsed: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);

        let invalid: Result<PlayerId, _> = serde_json::from_str(r#""""#);
        assert!(invalid.is_err());
    }
}
