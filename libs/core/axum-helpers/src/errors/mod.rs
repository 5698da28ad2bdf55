pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every JSON error response.
///
/// ```json
/// {
///   "code": 2001,
///   "error": "STORAGE_ERROR",
///   "message": "Event store error"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }
}

/// Application error type that renders as a JSON [`ErrorResponse`].
///
/// Domain crates convert their errors into this at the handler boundary.
/// Server-side variants log the cause and hide it from the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored event decode error: {0}")]
    StoredEventDecode(String),

    #[error("Schema error: {0}")]
    Schema(String),
}

impl AppError {
    /// Status, code and client-facing message for this error.
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::InvalidJson(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidJson, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone())
            }
            AppError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StorageError,
                ErrorCode::StorageError.default_message().to_string(),
            ),
            AppError::StoredEventDecode(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StoredEventDecode,
                ErrorCode::StoredEventDecode.default_message().to_string(),
            ),
            AppError::Schema(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::SchemaError,
                ErrorCode::SchemaError.default_message().to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), "{}", self);
        } else {
            tracing::info!(error_code = code.code(), "{}", self);
        }

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
