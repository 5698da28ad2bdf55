//! MongoDB implementation of EventStore

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Collection, Database, IndexModel};
use serde_json::Value;
use tracing::{info, instrument};

use crate::error::EventResult;
use crate::models::EventType;
use crate::repository::EventStore;

pub const COLLECTION: &str = "events";

/// MongoDB event store; each payload is one document
#[derive(Clone)]
pub struct MongoEventStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoEventStore {
    pub fn new(client: Client, database: &Database) -> Self {
        Self {
            client,
            collection: database.collection(COLLECTION),
        }
    }

    /// Compound index backing the lifetime value query
    pub async fn create_indexes(&self) -> EventResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "type": 1, "userId": 1 })
            .build();

        self.collection.create_index(index).await?;
        info!(collection = COLLECTION, "Event indexes ensured");
        Ok(())
    }
}

/// Back to plain JSON, dropping the server-assigned `_id`
fn to_json(mut document: Document) -> Value {
    document.remove("_id");
    Bson::Document(document).into_relaxed_extjson()
}

#[async_trait]
impl EventStore for MongoEventStore {
    #[instrument(skip(self, payload))]
    async fn insert(&self, payload: &Value) -> EventResult<()> {
        let document = mongodb::bson::to_document(payload)?;
        let result = self.collection.insert_one(document).await?;

        tracing::debug!(inserted_id = %result.inserted_id, "Stored event");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_orders_by_user(&self, user_id: &str) -> EventResult<Vec<Value>> {
        let filter = doc! {
            "type": EventType::OrderCompleted.to_string(),
            "userId": user_id,
        };

        let documents: Vec<Document> = self.collection.find(filter).await?.try_collect().await?;
        Ok(documents.into_iter().map(to_json).collect())
    }

    async fn ping(&self) -> EventResult<()> {
        database::mongodb::check_health(&self.client).await?;
        Ok(())
    }
}
