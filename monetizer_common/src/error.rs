//! Error types shared between client and server.
//!
//! The `MonetizerError` enum unifies the failure taxonomy of the service: missing
//! backend configuration, storage faults, an unavailable rate source and rejected
//! input. Each variant maps to a stable wire code so the client can rebuild the
//! same variant from a server error body.
use std::io;
use std::sync::PoisonError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum MonetizerError {
    /// Backend credentials or connection settings are missing. Not retryable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Read or write against the settings backend failed. Retryable.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The rate source refused to answer. Retryable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Input was rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// HTTP transport failed before a response was received (timeout, refused, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for MonetizerError {
    fn from(err: PoisonError<T>) -> Self {
        MonetizerError::MutexLock(err.to_string())
    }
}

/// Wire code for configuration failures.
pub const CONFIGURATION_ERROR: &str = "configuration_error";
/// Wire code for storage failures.
pub const STORAGE_ERROR: &str = "storage_error";
/// Wire code for an unavailable rate source.
pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";
/// Wire code for rejected input.
pub const VALIDATION_ERROR: &str = "validation_error";
/// Wire code for everything else.
pub const INTERNAL_ERROR: &str = "internal_error";

impl MonetizerError {
    /// Stable machine-readable code sent in the `error` field of a failure body.
    pub fn code(&self) -> &'static str {
        match self {
            MonetizerError::Configuration(_) => CONFIGURATION_ERROR,
            MonetizerError::Storage(_) => STORAGE_ERROR,
            MonetizerError::ServiceUnavailable(_) => SERVICE_UNAVAILABLE,
            MonetizerError::Validation(_) => VALIDATION_ERROR,
            MonetizerError::Io(_)
            | MonetizerError::SerdeJson(_)
            | MonetizerError::Transport(_)
            | MonetizerError::MutexLock(_) => INTERNAL_ERROR,
        }
    }

    /// HTTP status code the server answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            MonetizerError::Validation(_) => 400,
            MonetizerError::ServiceUnavailable(_) => 503,
            _ => 500,
        }
    }

    /// Whether re-issuing the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MonetizerError::Storage(_)
                | MonetizerError::ServiceUnavailable(_)
                | MonetizerError::Transport(_)
        )
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            MonetizerError::Configuration(msg)
            | MonetizerError::Storage(msg)
            | MonetizerError::ServiceUnavailable(msg)
            | MonetizerError::Validation(msg)
            | MonetizerError::Transport(msg)
            | MonetizerError::MutexLock(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Structured failure body: `{ "error": code, "message": text }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// One of the wire codes defined in this module.
    pub error: String,
    /// Message suitable for showing to the user.
    pub message: String,
}

impl From<&MonetizerError> for ErrorBody {
    fn from(err: &MonetizerError) -> Self {
        ErrorBody {
            error: err.code().to_string(),
            message: err.message(),
        }
    }
}

impl From<ErrorBody> for MonetizerError {
    fn from(body: ErrorBody) -> Self {
        match body.error.as_str() {
            CONFIGURATION_ERROR => MonetizerError::Configuration(body.message),
            STORAGE_ERROR => MonetizerError::Storage(body.message),
            SERVICE_UNAVAILABLE => MonetizerError::ServiceUnavailable(body.message),
            VALIDATION_ERROR => MonetizerError::Validation(body.message),
            _ => MonetizerError::Transport(body.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(MonetizerError::Validation("x".into()).status_code(), 400);
        assert_eq!(MonetizerError::Storage("x".into()).status_code(), 500);
        assert_eq!(MonetizerError::Configuration("x".into()).status_code(), 500);
        assert_eq!(
            MonetizerError::ServiceUnavailable("x".into()).status_code(),
            503
        );
    }

    #[test]
    fn error_body_restores_variant() {
        let original = MonetizerError::ServiceUnavailable("rates offline".into());
        let body = ErrorBody::from(&original);
        assert_eq!(body.error, SERVICE_UNAVAILABLE);
        assert_eq!(body.message, "rates offline");

        let restored = MonetizerError::from(body);
        assert!(matches!(restored, MonetizerError::ServiceUnavailable(ref m) if m == "rates offline"));
        assert!(restored.is_retryable());
    }

    #[test]
    fn configuration_is_not_retryable() {
        assert!(!MonetizerError::Configuration("no db".into()).is_retryable());
        assert!(!MonetizerError::Validation("bad".into()).is_retryable());
    }

    #[test]
    fn unknown_code_maps_to_transport() {
        let body = ErrorBody {
            error: "teapot".into(),
            message: "short and stout".into(),
        };
        assert!(matches!(MonetizerError::from(body), MonetizerError::Transport(_)));
    }
}
