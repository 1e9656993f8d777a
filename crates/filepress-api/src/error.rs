//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors
//! convert into [`AppError`] here so every failure renders the same JSON body
//! and is logged at the level its metadata asks for.
//!
//! The rendered body never carries details. For non-sensitive errors the
//! detailed body rides along as a [`DetailedErrorBody`] response extension;
//! [`expose_error_details`] swaps it in, and routes only install that layer
//! outside production.

use axum::{
    extract::{multipart::MultipartError, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use filepress_core::{AppError, ErrorMetadata, LogLevel};
use filepress_processing::UploadError;
use filepress_storage::StorageError;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
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
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: AppError lives in filepress-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
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
            tracing::error!(
                error = %error,
                error_type = error_type,
                details = %error.detailed_message(),
                "Error occurred"
            );
        }
    }
}

/// Full error body, attached to responses for non-sensitive errors
#[derive(Clone, Debug)]
pub struct DetailedErrorBody(pub ErrorResponse);

/// Replace error bodies with their detailed form. Development only.
pub async fn expose_error_details(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let detailed = response.extensions_mut().remove::<DetailedErrorBody>();
    match detailed {
        Some(DetailedErrorBody(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}

impl HttpAppError {
    fn to_body(&self, show_details: bool) -> ErrorResponse {
        let app_error = &self.0;
        ErrorResponse {
            error: app_error.client_message(),
            details: show_details.then(|| app_error.detailed_message()),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        let mut response = (status, Json(self.to_body(false))).into_response();
        if !self.0.is_sensitive() {
            response
                .extensions_mut()
                .insert(DetailedErrorBody(self.to_body(true)));
        }
        response
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        let app = match err {
            UploadError::Validation(e) => AppError::InvalidInput(e.to_string()),
            e @ UploadError::Processing(_) => AppError::Processing(e.to_string()),
            UploadError::Internal(source) => AppError::InternalWithSource {
                message: format!("{:#}", source),
                source,
            },
        };
        HttpAppError(app)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(_) => AppError::NotFound("File not found".to_string()),
            other => AppError::Storage(other.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("File exceeds the maximum upload size".to_string())
        } else {
            AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
        };
        HttpAppError(app)
    }
}
