//! Readiness endpoint

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings the event store; 503 when it is unreachable
async fn readiness_check(State(state): State<AppState>) -> Response {
    let store = state.store_name();
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        store.as_str(),
        Box::pin(async { state.events.health().await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await.into_response()
}
