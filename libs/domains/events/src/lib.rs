//! Events Domain
//!
//! Ingests analytics events, validates them against a JSON Type Definition
//! schema, stores them verbatim and computes per-user lifetime value.
//!
//! # Architecture
//!
//! ```text
//! POST /v1/events ─► EventService::ingest ─► EventSchema::validate
//!                                          └► EventStore::insert ─┬─► PgEventStore    (jsonb)
//!                                                                 ├─► MongoEventStore (documents)
//! GET /v1/ltv ─────► EventService::lifetime_value                 └─► InMemoryEventStore
//!                      └► EventStore::find_orders_by_user ─► codec::decode ─► Σ revenue
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{EventSchema, EventService, InMemoryEventStore, handlers};
//!
//! let service = EventService::new(InMemoryEventStore::new(), EventSchema::embedded().unwrap());
//! let router = axum::Router::new().nest("/v1", handlers::router(service));
//! ```

use utoipa::OpenApi;

pub mod codec;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongo;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod service;

pub use codec::CodecError;
pub use error::{EventError, EventResult};
pub use models::{Event, EventType, Heartbeat, OrderCompleted, PageViewed, ValidationError};
pub use mongo::MongoEventStore;
pub use postgres::PgEventStore;
pub use repository::{EventStore, InMemoryEventStore};
pub use schema::{EventSchema, SchemaError};
pub use service::EventService;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::create_event, handlers::lifetime_value),
    components(schemas(
        Event,
        PageViewed,
        OrderCompleted,
        Heartbeat,
        ValidationError,
        axum_helpers::ErrorResponse,
    )),
    tags(
        (name = handlers::TAG, description = "Analytics event ingestion and lifetime value")
    )
)]
pub struct ApiDoc;
