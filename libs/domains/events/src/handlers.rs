use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::ErrorResponse;
use std::sync::Arc;

use crate::error::EventResult;
use crate::models::{Event, ValidationError};
use crate::repository::EventStore;
use crate::service::EventService;

pub const TAG: &str = "events";

/// Routes relative to the API version prefix: `POST /events`, `GET /ltv`
pub fn router<S: EventStore + 'static>(service: EventService<S>) -> Router {
    router_with_service(Arc::new(service))
}

/// Same as [`router`] for a service that is also used elsewhere (e.g. readiness)
pub fn router_with_service<S: EventStore + 'static>(service: Arc<EventService<S>>) -> Router {
    Router::new()
        .route("/events", post(create_event))
        .route("/ltv", get(lifetime_value))
        .with_state(service)
}

/// First `userId` in the query string; missing means "" and repeats are ignored
fn first_user_id(params: &[(String, String)]) -> &str {
    params
        .iter()
        .find(|(key, _)| key == "userId")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default()
}

/// Validate and store an event, echoing it back
#[utoipa::path(
    post,
    path = "/events",
    tag = TAG,
    request_body(content = Event, content_type = "application/json"),
    responses(
        (status = 200, description = "Event stored; the request body is echoed", body = Event),
        (status = 400, description = "Body is not JSON (error object) or violates the schema (indicator array)", body = Vec<ValidationError>),
        (status = 500, description = "Validator or event store failure", body = ErrorResponse)
    )
)]
pub async fn create_event<S: EventStore>(
    State(service): State<Arc<EventService<S>>>,
    body: Bytes,
) -> EventResult<Response> {
    service.ingest(&body).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Lifetime value: total revenue of the user's completed orders
#[utoipa::path(
    get,
    path = "/ltv",
    tag = TAG,
    params(
        ("userId" = Option<String>, Query, description = "User whose completed orders are summed; missing means the empty id")
    ),
    responses(
        (status = 200, description = "Revenue total with six decimals", body = String, content_type = "text/plain"),
        (status = 500, description = "Event store failure or undecodable stored event", body = ErrorResponse)
    )
)]
pub async fn lifetime_value<S: EventStore>(
    State(service): State<Arc<EventService<S>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> EventResult<String> {
    let total = service.lifetime_value(first_user_id(&params)).await?;
    Ok(format_ltv(total))
}

fn format_ltv(total: f64) -> String {
    format!("{:.6}", total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ltv_uses_six_decimals() {
        assert_eq!(format_ltv(0.0), "0.000000");
        assert_eq!(format_ltv(42.5), "42.500000");
        assert_eq!(format_ltv(0.1 + 0.2), "0.300000");
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_user_id_takes_first_of_repeats() {
        let query = params(&[("userId", "alice"), ("userId", "bob")]);
        assert_eq!(first_user_id(&query), "alice");
    }

    #[test]
    fn test_first_user_id_missing_is_empty() {
        assert_eq!(first_user_id(&params(&[("user", "alice")])), "");
        assert_eq!(first_user_id(&[]), "");
    }
}
