use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::codec::TAG_FIELD;
use crate::error::EventResult;
use crate::models::EventType;

/// Persistence for raw, already validated event payloads
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Store the payload verbatim
    async fn insert(&self, payload: &Value) -> EventResult<()>;

    /// All "Order Completed" payloads whose `userId` equals `user_id`
    async fn find_orders_by_user(&self, user_id: &str) -> EventResult<Vec<Value>>;

    /// Cheap round trip to the backing store, for readiness probes
    async fn ping(&self) -> EventResult<()>;
}

#[async_trait]
impl<T: EventStore + ?Sized> EventStore for Arc<T> {
    async fn insert(&self, payload: &Value) -> EventResult<()> {
        (**self).insert(payload).await
    }

    async fn find_orders_by_user(&self, user_id: &str) -> EventResult<Vec<Value>> {
        (**self).find_orders_by_user(user_id).await
    }

    async fn ping(&self) -> EventResult<()> {
        (**self).ping().await
    }
}

/// True when `payload` is an order completed by `user_id`
pub(crate) fn is_order_of(payload: &Value, user_id: &str) -> bool {
    let order_tag = EventType::OrderCompleted.to_string();
    payload.get(TAG_FIELD).and_then(Value::as_str) == Some(order_tag.as_str())
        && payload.get("userId").and_then(Value::as_str) == Some(user_id)
}

/// In-memory implementation of EventStore (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<Value>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn insert(&self, payload: &Value) -> EventResult<()> {
        self.events.write().await.push(payload.clone());
        Ok(())
    }

    async fn find_orders_by_user(&self, user_id: &str) -> EventResult<Vec<Value>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|payload| is_order_of(payload, user_id))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> EventResult<()> {
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventStore {}

        #[async_trait]
        impl EventStore for EventStore {
            async fn insert(&self, payload: &Value) -> EventResult<()>;
            async fn find_orders_by_user(&self, user_id: &str) -> EventResult<Vec<Value>>;
            async fn ping(&self) -> EventResult<()>;
        }
    }
}
