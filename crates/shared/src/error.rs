//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module-level services define their own error enums; this type is the
/// common denominator the transport layer maps responses from.
#[derive(Debug, Error)]
pub enum AppError {
    /// Referenced tenant-scoped row is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with existing state (e.g., re-matching a
    /// reconciled bank item to a different transaction).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed or out-of-range input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store or transaction failure. Never retried by the core.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Internal invariant violation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::InvalidInput(_) => 400,
            Self::Persistence(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::InvalidInput(String::new()).status_code(), 400);
        assert_eq!(AppError::Persistence(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::InvalidInput(String::new()).error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            AppError::Persistence(String::new()).error_code(),
            "PERSISTENCE_FAILURE"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("transaction".into()).to_string(),
            "Not found: transaction"
        );
        assert_eq!(
            AppError::Conflict("already reconciled".into()).to_string(),
            "Conflict: already reconciled"
        );
        assert_eq!(
            AppError::InvalidInput("bad amount".into()).to_string(),
            "Invalid input: bad amount"
        );
    }
}
