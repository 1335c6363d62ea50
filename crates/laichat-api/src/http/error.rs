//! Application error type mapping to HTTP status codes and the JSON
//! error envelope.
//!
//! Every non-streaming route reports failures through this type. The
//! completion gateway (`POST /api/chat`) is the one exception: it keeps
//! the flat `{"error": string}` body its clients already understand and
//! builds those responses by hand in its handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use laichat_types::error::{QuoteError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed identity header.
    Unauthorized(String),
    /// Bad request input.
    Validation(String),
    /// The addressed record does not exist (or is not the caller's).
    NotFound(String),
    /// The server is missing a required credential.
    Configuration(String),
    /// Anything else.
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => AppError::NotFound("Record not found".to_string()),
            RepositoryError::Conflict(msg) => AppError::Validation(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(e: QuoteError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Configuration(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR", msg)
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
