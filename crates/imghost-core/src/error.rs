//! Error types module
//!
//! All errors are unified under the `AppError` enum, which can represent
//! database, storage, validation, and HTTP-surface errors. The HTTP layer
//! wraps it in its own newtype to implement `IntoResponse`.

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures
    Debug,
    /// Recoverable issues worth noticing
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Metadata store is disabled")]
    StoreDisabled,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<crate::validation::ValidationError> for AppError {
    fn from(err: crate::validation::ValidationError) -> Self {
        use crate::validation::ValidationError;
        match err {
            ValidationError::MissingFile => {
                AppError::BadRequest("No file field in request.".to_string())
            }
            ValidationError::MissingFilename => AppError::BadRequest("No file selected.".to_string()),
            err @ ValidationError::MissingExtension(_)
            | err @ ValidationError::UnsupportedExtension { .. } => {
                AppError::BadRequest(err.to_string())
            }
            err @ ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
        }
    }
}

impl AppError {
    /// HTTP status code this error maps to.
    ///
    /// `StoreDisabled` maps to 200: the degraded-store path is reported
    /// through a structured payload, never as an error status.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Database(_) => 500,
            AppError::StoreDisabled => 200,
            AppError::Storage(_) => 500,
            AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Internal(_) => 500,
        }
    }

    /// Client-facing message. Internal detail is hidden for 5xx errors.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error.".to_string(),
            AppError::StoreDisabled => "Database is not configured.".to_string(),
            AppError::Storage(_) => "Storage error.".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error.".to_string(),
        }
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
            AppError::StoreDisabled => LogLevel::Warn,
            AppError::BadRequest(_) | AppError::NotFound(_) | AppError::PayloadTooLarge(_) => {
                LogLevel::Debug
            }
        }
    }

    /// Variant name for structured log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::StoreDisabled => "StoreDisabled",
            AppError::Storage(_) => "Storage",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("missing file".into()).http_status_code(),
            400
        );
        assert_eq!(
            AppError::PayloadTooLarge("too big".into()).http_status_code(),
            413
        );
        assert_eq!(AppError::NotFound("gone".into()).http_status_code(), 404);
        assert_eq!(AppError::StoreDisabled.http_status_code(), 200);
        assert_eq!(
            AppError::Database(SqlxError::PoolTimedOut).http_status_code(),
            500
        );
    }

    #[test]
    fn test_client_message_hides_internal_detail() {
        let err = AppError::Database(SqlxError::PoolClosed);
        assert_eq!(err.client_message(), "Database error.");

        let err = AppError::Internal("connection reset by peer".into());
        assert_eq!(err.client_message(), "Internal server error.");
    }

    #[test]
    fn test_client_message_echoes_request_errors() {
        let err = AppError::BadRequest("No file field in request.".into());
        assert_eq!(err.client_message(), "No file field in request.");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_validation_error_mapping() {
        use crate::validation::ValidationError;

        let err: AppError = ValidationError::UnsupportedExtension {
            extension: "exe".into(),
            allowed: vec!["jpg".into(), "png".into(), "gif".into()],
        }
        .into();
        assert_eq!(err.http_status_code(), 400);
        assert!(err.client_message().contains("exe"));

        let err: AppError = ValidationError::FileTooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        }
        .into();
        assert_eq!(err.http_status_code(), 413);

        let err: AppError = ValidationError::MissingFile.into();
        assert_eq!(err.client_message(), "No file field in request.");
    }
}
