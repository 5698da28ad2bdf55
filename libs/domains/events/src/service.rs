use serde_json::Value;
use tracing::{info, instrument};

use crate::codec;
use crate::error::{EventError, EventResult};
use crate::repository::EventStore;
use crate::schema::EventSchema;

/// Validates, stores and aggregates events
pub struct EventService<S: EventStore> {
    store: S,
    schema: EventSchema,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S, schema: EventSchema) -> Self {
        Self { store, schema }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse, validate and persist a raw request body.
    ///
    /// Returns the parsed payload; it is stored exactly as received.
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn ingest(&self, body: &[u8]) -> EventResult<Value> {
        let payload: Value = serde_json::from_slice(body).map_err(EventError::InvalidJson)?;

        let errors = self.schema.validate(&payload)?;
        if !errors.is_empty() {
            return Err(EventError::Validation(errors));
        }

        self.store.insert(&payload).await?;
        info!(event_type = ?payload.get(codec::TAG_FIELD), "Event ingested");

        Ok(payload)
    }

    /// Sum of revenue over the user's completed orders.
    ///
    /// Every stored order must still decode; one that does not fails the
    /// whole computation instead of being skipped.
    #[instrument(skip(self))]
    pub async fn lifetime_value(&self, user_id: &str) -> EventResult<f64> {
        let payloads = self.store.find_orders_by_user(user_id).await?;
        let orders = payloads.len();

        let mut total = 0.0;
        for payload in payloads {
            total += codec::decode(payload)?.revenue().unwrap_or_default();
        }

        info!(orders, total, "Computed lifetime value");
        Ok(total)
    }

    pub async fn health(&self) -> EventResult<()> {
        self.store.ping().await
    }
}
