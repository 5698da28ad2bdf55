//! API routes module
//!
//! Versioned event routes plus the readiness probe. Liveness (`/health`) and
//! the documentation UIs are added in `main`.

pub mod health;

use axum::Router;
use domain_events::handlers;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/v1", handlers::router_with_service(state.events.clone()))
        .merge(health::router(state.clone()))
}
