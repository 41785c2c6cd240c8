//! HTTP error response conversion
//!
//! Wraps `AppError` in a local newtype so it can implement `IntoResponse`
//! (orphan rules: both trait and type live in other crates). Handlers
//! return `Result<impl IntoResponse, HttpAppError>` and use `?` freely.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imghost_core::{AppError, LogLevel};
use imghost_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_to_app(err))
    }
}

/// Map storage failures onto the application error taxonomy.
pub fn storage_to_app(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(name) => AppError::NotFound(format!("File not found: {}", name)),
        StorageError::InvalidName(msg) => AppError::BadRequest(msg),
        StorageError::ExceedsSizeLimit { limit } => {
            AppError::PayloadTooLarge(format!("File exceeds size limit of {} bytes", limit))
        }
        other => AppError::Storage(other.to_string()),
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            success: false,
            error: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err = storage_to_app(StorageError::NotFound("missing.png".into()));
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn test_storage_size_limit_maps_to_413() {
        let err = storage_to_app(StorageError::ExceedsSizeLimit {
            limit: 5 * 1024 * 1024,
        });
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("5242880"));
    }

    #[test]
    fn test_storage_io_detail_is_hidden() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk exploded");
        let err = storage_to_app(StorageError::IoError(io_err));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Storage error.");
    }
}
