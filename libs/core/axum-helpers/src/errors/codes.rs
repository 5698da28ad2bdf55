//! Error codes carried in every JSON error body.
//!
//! Each code has a string form for clients, an integer form for logs and
//! metrics, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidJson;
//! assert_eq!(code.as_str(), "INVALID_JSON");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body is not well-formed JSON
    InvalidJson,

    /// Required parameter missing or malformed
    BadRequest,

    /// No route matches the request path
    NotFound,

    // Storage errors (2000-2999)
    /// Event store rejected or failed an operation
    StorageError,

    /// Stored document could not be decoded as an event
    StoredEventDecode,

    // Schema errors (3000s)
    /// Event schema could not be loaded or compiled
    SchemaError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::StorageError => "STORAGE_ERROR",
            Self::StoredEventDecode => "STORED_EVENT_DECODE",
            Self::SchemaError => "SCHEMA_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// Ranges:
    /// - 1000-1999: client errors
    /// - 2000-2999: storage errors
    /// - 3000-3999: schema errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidJson => 1002,
            Self::BadRequest => 1003,
            Self::NotFound => 1004,

            Self::StorageError => 2001,
            Self::StoredEventDecode => 2002,

            Self::SchemaError => 3001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Request body is not valid JSON",
            Self::BadRequest => "Bad request",
            Self::NotFound => "The requested resource was not found",
            Self::StorageError => "Event store error",
            Self::StoredEventDecode => "Stored event could not be decoded",
            Self::SchemaError => "Event schema error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
