//! Error types for lexirank
//!
//! The ranking and graph algorithms themselves never fail: degenerate input
//! (empty text, no surviving terms) resolves to a zero score or an empty
//! graph. Errors only surface at the edges of the crate, where loosely-typed
//! payloads and configuration files are turned into the typed records the
//! algorithms consume.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LexiRankError>;

/// Main error type for lexirank
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexiRankError {
    /// A field that must hold text held some other JSON value
    #[error("Type mismatch at '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Reading a request or config file failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl LexiRankError {
    /// Create a type mismatch error
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Check if this error was caused by a caller passing the wrong kind of value
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for LexiRankError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for LexiRankError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
