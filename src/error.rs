//! Error types for smexperiments
//!
//! Not-found is kept apart from every other remote failure so callers can
//! branch on existence without string matching.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// smexperiments error types
#[derive(Error, Debug)]
pub enum Error {
    /// A record or value-object declaration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote side reports that the addressed record does not exist
    #[error("Resource not found ({operation}): {message}")]
    NotFound {
        /// Operation that reported the missing resource
        operation: String,
        /// Message returned by the remote side
        message: String,
    },

    /// The remote side rejected the call
    #[error("Service error ({operation}): {code}: {message}")]
    Service {
        /// Operation that failed
        operation: String,
        /// Remote error code (e.g. `ValidationException`)
        code: String,
        /// Message returned by the remote side
        message: String,
    },

    /// The call never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON error (configuration parsing)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a not-found error for `operation`.
    pub fn not_found(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Build a service error for `operation`.
    pub fn service(
        operation: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            operation: operation.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns true if the remote side reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
