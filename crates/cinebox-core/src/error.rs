//! Error types module
//!
//! This module provides the core error types used throughout the Cinebox
//! client. All errors are unified under the `AppError` enum, which covers
//! local validation, the authentication gate, session persistence, and
//! failures reported by the remote API or the storage service.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Storage transfer failed: {0}")]
    Transfer(String),

    #[error("Session state error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Session(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

impl AppError {
    /// Whether the error came from the client side (validation, auth gate)
    /// rather than from the network or a remote service.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_) | AppError::Unauthorized(_) | AppError::Session(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = AppError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 503: service unavailable"
        );
        assert!(!err.is_client_side());
    }

    #[test]
    fn test_invalid_input_is_client_side() {
        let err = AppError::InvalidInput("missing title".to_string());
        assert!(err.is_client_side());
        assert_eq!(err.to_string(), "Invalid input: missing title");
    }

    #[test]
    fn test_io_error_maps_to_session() {
        let err = AppError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, AppError::Session(_)));
        assert!(err.to_string().contains("gone"));
    }
}
