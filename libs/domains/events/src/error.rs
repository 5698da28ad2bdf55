use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use thiserror::Error;

use crate::codec::CodecError;
use crate::models::ValidationError;
use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Event failed schema validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Event store error: {0}")]
    Storage(String),

    /// A stored document no longer decodes as an [`Event`](crate::models::Event)
    #[error("Stored event could not be decoded: {0}")]
    Decode(#[from] CodecError),
}

pub type EventResult<T> = Result<T, EventError>;

impl From<sea_orm::DbErr> for EventError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Storage(format!("BSON serialization error: {}", err))
    }
}

impl From<database::DatabaseError> for EventError {
    fn from(err: database::DatabaseError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::InvalidJson(e) => AppError::InvalidJson(e.to_string()),
            // Only for callers converting directly; handlers render the indicator array via
            // `EventError::into_response` and never reach this arm.
            EventError::Validation(errors) => {
                AppError::BadRequest(format!("{} schema violation(s)", errors.len()))
            }
            EventError::Schema(e) => AppError::Schema(e.to_string()),
            EventError::Storage(msg) => AppError::Storage(msg),
            EventError::Decode(e) => AppError::StoredEventDecode(e.to_string()),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        match self {
            // Clients get the bare indicator list
            EventError::Validation(errors) => {
                tracing::info!(errors = errors.len(), "Rejected event failing schema validation");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_renders_indicator_array() {
        let response = EventError::Validation(vec![ValidationError {
            instance_path: "/revenue".into(),
            schema_path: "/mapping/Order Completed/properties/revenue/type".into(),
        }])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!([{
                "instancePath": "/revenue",
                "schemaPath": "/mapping/Order Completed/properties/revenue/type"
            }])
        );
    }

    #[tokio::test]
    async fn test_validation_converted_directly_is_bad_request_envelope() {
        let errors = vec![
            ValidationError {
                instance_path: "".into(),
                schema_path: "/mapping/Heartbeat/properties/userId".into(),
            },
            ValidationError {
                instance_path: "/timestamp".into(),
                schema_path: "/mapping/Heartbeat/properties/timestamp/type".into(),
            },
        ];
        let response = AppError::from(EventError::Validation(errors)).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "BAD_REQUEST");
        assert_eq!(body["message"], "2 schema violation(s)");
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let parse_err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let response = EventError::InvalidJson(parse_err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_storage_and_decode_errors_are_500() {
        let response = EventError::Storage("pool timed out".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = EventError::Decode(CodecError::MissingTag).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "STORED_EVENT_DECODE");
    }
}
