use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Scope not found: {0}")]
    ScopeNotFound(String),

    #[error("Content type unavailable: {0}")]
    ContentTypeUnavailable(String),

    #[error("Ingestion failed: {0}")]
    IngestionFailed(String),

    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AppError {
    /// Machine-stable error kind returned to callers alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::InvalidPayload(_) => "invalid_payload",
            AppError::ScopeNotFound(_) => "scope_not_found",
            AppError::ContentTypeUnavailable(_) => "content_type_unavailable",
            AppError::IngestionFailed(_) => "ingestion_failed",
            AppError::ContentNotFound(_) => "content_not_found",
            AppError::Validation(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::Internal(_) => "internal_error",
            AppError::Auth(_) | AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "authorization_denied",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::InvalidPayload(ref msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid payload: {}", msg),
                None,
            ),
            AppError::ScopeNotFound(ref msg) => (
                StatusCode::NOT_FOUND,
                format!("Scope not found: {}", msg),
                None,
            ),
            AppError::ContentTypeUnavailable(ref msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!(
                    "H5P content type not found. Make sure H5P is enabled in the content bank. {}",
                    msg
                ),
                None,
            ),
            AppError::IngestionFailed(ref msg) => {
                tracing::error!("Ingestion failed: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("H5P upload failed: {}", msg),
                    None,
                )
            }
            AppError::ContentNotFound(ref msg) => (
                StatusCode::NOT_FOUND,
                format!("Content not found: {}", msg),
                None,
            ),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), Some(code), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            AppError::InvalidPayload("x".into()).code(),
            "invalid_payload"
        );
        assert_eq!(AppError::ScopeNotFound("x".into()).code(), "scope_not_found");
        assert_eq!(
            AppError::ContentTypeUnavailable("x".into()).code(),
            "content_type_unavailable"
        );
        assert_eq!(
            AppError::IngestionFailed("x".into()).code(),
            "ingestion_failed"
        );
        assert_eq!(
            AppError::ContentNotFound("x".into()).code(),
            "content_not_found"
        );
        assert_eq!(
            AppError::Forbidden("x".into()).code(),
            "authorization_denied"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidPayload("bad".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ContentNotFound("1".into())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("no".into()).into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
