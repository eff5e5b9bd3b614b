//! Error types for cfgitem

use thiserror::Error;

use crate::config::Datatype;

/// Result type alias for cfgitem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cfgitem
///
/// Structural errors are returned while building an item or calling one of its
/// structural setters. Rejected runtime updates are not errors: they are
/// reported as `false` by [`ConfigurationItem::update_curr_value`].
///
/// [`ConfigurationItem::update_curr_value`]: crate::ConfigurationItem::update_curr_value
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Structural Errors
    // -------------------------------------------------------------------------
    #[error("Invalid datatype '{0}': expected one of bool, string, int, float, list, dict")]
    InvalidDatatype(String),

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid argument for {key}: {reason}")]
    InvalidArgument { key: String, reason: String },

    #[error("Invalid regex pattern for {key}: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    // -------------------------------------------------------------------------
    // Coercion Errors
    // -------------------------------------------------------------------------
    #[error("Cannot coerce '{input}' to {datatype}: {reason}")]
    Coercion {
        datatype: Datatype,
        input: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a type-mismatch class error
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this is an invalid-argument class error
    ///
    /// Unknown datatype tags and uncompilable patterns fall in this class.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidDatatype(_) | Error::InvalidArgument { .. } | Error::InvalidPattern { .. }
        )
    }

    pub(crate) fn type_mismatch(
        key: &str,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub(crate) fn invalid_argument(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
