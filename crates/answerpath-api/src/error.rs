//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `?` so they
//! become `HttpAppError` and render consistently (status, body, logging).

use answerpath_core::{AppError, ErrorMetadata, LogLevel, ValidationError};
use answerpath_storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Retry after a short delay")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from answerpath-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_error_to_app_error(err))
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(validation_error_to_app_error(err))
    }
}

pub(crate) fn storage_error_to_app_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(msg) => AppError::NotFound(msg),
        StorageError::WriteFailed(msg) => AppError::Storage(msg),
        StorageError::ReadFailed(msg) => AppError::Storage(msg),
        StorageError::DeleteFailed(msg) => AppError::Storage(msg),
        StorageError::InvalidLocator(msg) => AppError::InvalidInput(msg),
        StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
        StorageError::ConfigError(msg) => AppError::Internal(msg),
    }
}

pub(crate) fn validation_error_to_app_error(err: ValidationError) -> AppError {
    match err {
        ValidationError::FileTooLarge { .. } => {
            AppError::PayloadTooLarge("File size exceeds 10MB limit.".to_string())
        }
        ValidationError::InvalidContentType { .. } => AppError::InvalidInput(
            "Invalid file type. Only PDF, DOCX, XLSX, XLS, and TXT files are allowed.".to_string(),
        ),
        ValidationError::InvalidFilename(msg) => AppError::InvalidInput(msg),
        ValidationError::EmptyFile => AppError::InvalidInput("No file provided".to_string()),
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production for security; in non-production, only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err = HttpAppError::from(StorageError::NotFound("blob".to_string()));
        assert_eq!(err.0.http_status_code(), 404);
    }

    #[test]
    fn test_storage_write_failure_maps_to_500() {
        let err = HttpAppError::from(StorageError::WriteFailed("disk full".to_string()));
        assert_eq!(err.0.http_status_code(), 500);
        assert_eq!(err.0.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_oversize_upload_maps_to_400_with_legacy_message() {
        let err = HttpAppError::from(ValidationError::FileTooLarge {
            size: 11_000_000,
            max: 10_485_760,
        });
        assert_eq!(err.0.http_status_code(), 400);
        assert_eq!(err.0.client_message(), "File size exceeds 10MB limit.");
    }

    #[test]
    fn test_invalid_content_type_message() {
        let err = HttpAppError::from(ValidationError::InvalidContentType {
            content_type: "application/zip".to_string(),
            allowed: vec![],
        });
        assert_eq!(err.0.http_status_code(), 400);
        assert_eq!(
            err.0.client_message(),
            "Invalid file type. Only PDF, DOCX, XLSX, XLS, and TXT files are allowed."
        );
    }

    #[test]
    fn test_empty_multipart_maps_to_no_file_provided() {
        let err = HttpAppError::from(ValidationError::EmptyFile);
        assert_eq!(err.0.client_message(), "No file provided");
    }
}
