//! Handler tests for the events domain
//!
//! These drive the `/v1` routes end to end over the in-memory store:
//! - Request bodies are validated and echoed byte for byte
//! - Schema violations come back as a bare indicator array
//! - Lifetime value is plain text with six decimals
//!
//! No containers are needed; the Postgres and MongoDB stores are covered by
//! `integration_test.rs`.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app<S: EventStore + 'static>(store: S) -> Router {
    let service = EventService::new(store, EventSchema::embedded().unwrap());
    Router::new().nest("/v1", handlers::router(service))
}

fn post_event(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get_ltv(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/v1/ltv{}", query))
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

async fn body_text(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).unwrap()
}

/// Store whose every call fails, standing in for an unreachable database
struct BrokenStore;

#[async_trait]
impl EventStore for BrokenStore {
    async fn insert(&self, _payload: &Value) -> EventResult<()> {
        Err(EventError::Storage("connection reset".into()))
    }

    async fn find_orders_by_user(&self, _user_id: &str) -> EventResult<Vec<Value>> {
        Err(EventError::Storage("connection reset".into()))
    }

    async fn ping(&self) -> EventResult<()> {
        Err(EventError::Storage("connection reset".into()))
    }
}

#[tokio::test]
async fn test_create_event_echoes_body_verbatim() {
    let store = InMemoryEventStore::new();
    let app = app(store.clone());

    // Odd spacing and key order must survive untouched
    let raw = r#"{ "userId":"u1",  "type":"Heartbeat", "timestamp":"2024-01-01T00:00:00Z" }"#;
    let response = app.oneshot(post_event(raw)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_bytes(response.into_body()).await, raw.as_bytes());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_event_rejects_malformed_json() {
    let store = InMemoryEventStore::new();
    let app = app(store.clone());

    let response = app.oneshot(post_event("{\"type\": ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_event_schema_violation_returns_indicators() {
    let store = InMemoryEventStore::new();
    let app = app(store.clone());

    // Page Viewed without its url
    let body = json!({"type": "Page Viewed", "timestamp": "2024-01-01T00:00:00Z", "userId": "u1"});
    let response = app.oneshot(post_event(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors: Vec<Value> = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert!(!errors.is_empty());
    assert!(errors[0].get("instancePath").is_some());
    assert_eq!(errors[0]["schemaPath"], "/mapping/Page Viewed/properties/url");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_event_unknown_type_is_rejected() {
    let app = app(InMemoryEventStore::new());

    let body = json!({"type": "Cart Abandoned", "timestamp": "2024-01-01T00:00:00Z", "userId": "u1"});
    let response = app.oneshot(post_event(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors: Vec<Value> = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(errors[0]["instancePath"], "/type");
}

#[tokio::test]
async fn test_create_event_storage_failure_returns_500() {
    let app = app(BrokenStore);
    let builder = TestDataBuilder::from_test_name("handler_storage_failure");

    let body = builder.order_completed(&builder.user_id("buyer"), 5.0);
    let response = app.oneshot(post_event(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_lifetime_value_sums_only_the_users_orders() {
    let store = InMemoryEventStore::new();
    let app = app(store);
    let builder = TestDataBuilder::from_test_name("handler_ltv_sum");

    let alice = builder.user_id("alice");
    let bob = builder.user_id("bob");

    for body in [
        builder.order_completed(&alice, 10.5),
        builder.order_completed(&alice, 20.25),
        builder.order_completed(&bob, 99.0),
        builder.page_viewed(&alice, "https://example.com/checkout"),
        builder.heartbeat(&alice),
    ] {
        let response = app
            .clone()
            .oneshot(post_event(body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_ltv(&format!("?userId={}", alice)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(body_text(response.into_body()).await, "30.750000");

    let response = app
        .oneshot(get_ltv(&format!("?userId={}", bob)))
        .await
        .unwrap();
    assert_eq!(body_text(response.into_body()).await, "99.000000");
}

#[tokio::test]
async fn test_lifetime_value_unknown_user_is_zero() {
    let app = app(InMemoryEventStore::new());

    let response = app.oneshot(get_ltv("?userId=nobody")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response.into_body()).await, "0.000000");
}

#[tokio::test]
async fn test_lifetime_value_without_user_id_is_zero() {
    let app = app(InMemoryEventStore::new());

    let response = app.oneshot(get_ltv("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response.into_body()).await, "0.000000");
}

#[tokio::test]
async fn test_lifetime_value_repeated_user_id_uses_first() {
    let app = app(InMemoryEventStore::new());
    let builder = TestDataBuilder::from_test_name("handler_ltv_repeated_user_id");

    let alice = builder.user_id("alice");
    let bob = builder.user_id("bob");

    for body in [
        builder.order_completed(&alice, 7.25),
        builder.order_completed(&bob, 500.0),
    ] {
        let response = app
            .clone()
            .oneshot(post_event(body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get_ltv(&format!("?userId={}&userId={}", alice, bob)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response.into_body()).await, "7.250000");
}

#[tokio::test]
async fn test_lifetime_value_storage_failure_returns_500() {
    let app = app(BrokenStore);

    let response = app.oneshot(get_ltv("?userId=alice")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_lifetime_value_fails_on_corrupt_stored_order() {
    let store = InMemoryEventStore::new();
    // Bypasses validation, as a document edited in the database would
    store
        .insert(&json!({"type": "Order Completed", "userId": "alice", "revenue": "lots"}))
        .await
        .unwrap();

    let response = app(store).oneshot(get_ltv("?userId=alice")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
