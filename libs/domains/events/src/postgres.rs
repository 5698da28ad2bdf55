use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbBackend, EntityTrait, Statement};
use serde_json::Value;
use tracing::instrument;

use crate::entity;
use crate::error::EventResult;
use crate::models::EventType;
use crate::repository::EventStore;

const ORDERS_BY_USER_SQL: &str = "SELECT id, payload, created_at FROM events \
     WHERE payload->>'type' = $1 AND payload->>'userId' = $2 \
     ORDER BY created_at";

/// PostgreSQL event store; payloads live in a `jsonb` column
#[derive(Clone)]
pub struct PgEventStore {
    db: DatabaseConnection,
}

impl PgEventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    #[instrument(skip(self, payload))]
    async fn insert(&self, payload: &Value) -> EventResult<()> {
        let model = entity::ActiveModel::from_payload(payload.clone())
            .insert(&self.db)
            .await?;

        tracing::debug!(event_id = %model.id, "Stored event");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_orders_by_user(&self, user_id: &str) -> EventResult<Vec<Value>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            ORDERS_BY_USER_SQL,
            [EventType::OrderCompleted.to_string().into(), user_id.into()],
        );

        let models = entity::Entity::find()
            .from_raw_sql(stmt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.payload).collect())
    }

    async fn ping(&self) -> EventResult<()> {
        database::postgres::check_health(&self.db).await?;
        Ok(())
    }
}
