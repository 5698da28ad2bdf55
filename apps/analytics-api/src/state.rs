//! Application state management.
//!
//! The state holds the configuration, the event service shared by all
//! handlers and the connection to whichever backend `EVENT_STORE` selected,
//! so it can be closed on shutdown.

use database::postgres::DatabaseConnection;
use domain_events::{
    EventSchema, EventService, EventStore, InMemoryEventStore, MongoEventStore, PgEventStore,
    SchemaError,
};
use migration::Migrator;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{Config, StoreConfig};

/// Event service over a backend chosen at startup
pub type SharedEventService = Arc<EventService<Arc<dyn EventStore>>>;

/// Open connection to the configured backend
#[derive(Clone)]
enum Backend {
    Postgres(DatabaseConnection),
    Mongodb(database::mongodb::Client),
    Memory,
}

/// Shared application state.
///
/// Cloned for each handler (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub events: SharedEventService,
    backend: Backend,
}

impl AppState {
    /// Load the schema, connect to the configured store and prepare it
    /// (migrations for PostgreSQL, indexes for MongoDB).
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let schema = load_schema(config.schema_path.as_deref())?;

        let (store, backend): (Arc<dyn EventStore>, Backend) = match &config.store {
            StoreConfig::Postgres(postgres) => {
                info!("Connecting to PostgreSQL");
                let db =
                    database::postgres::connect_from_config_with_retry(postgres.clone(), None)
                        .await?;
                database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

                (Arc::new(PgEventStore::new(db.clone())), Backend::Postgres(db))
            }
            StoreConfig::Mongodb(mongo) => {
                info!("Connecting to MongoDB at {}", mongo.url());
                let client =
                    database::mongodb::connect_from_config_with_retry(mongo, None).await?;
                let store = MongoEventStore::new(client.clone(), &client.database(mongo.database()));
                store.create_indexes().await?;

                info!(
                    "Successfully connected to MongoDB database: {}",
                    mongo.database()
                );
                (Arc::new(store), Backend::Mongodb(client))
            }
            StoreConfig::Memory => {
                warn!("Using the in-memory event store; events are lost on restart");
                (Arc::new(InMemoryEventStore::new()), Backend::Memory)
            }
        };

        Ok(Self {
            events: Arc::new(EventService::new(store, schema)),
            backend,
            config,
        })
    }

    /// Name of the backend as reported by the readiness probe
    pub fn store_name(&self) -> String {
        self.config.store.kind().to_string()
    }

    /// Release the backend connection; called after in-flight requests drain
    pub async fn close(self) {
        match self.backend {
            Backend::Postgres(db) => match db.close().await {
                Ok(()) => info!("PostgreSQL connection pool closed"),
                Err(e) => error!(error = %e, "Failed to close PostgreSQL connection pool"),
            },
            Backend::Mongodb(client) => {
                client.shutdown().await;
                info!("MongoDB client shut down");
            }
            Backend::Memory => {}
        }
    }
}

/// The file named by `EVENT_SCHEMA_PATH`, or the schema built into the binary
fn load_schema(path: Option<&Path>) -> Result<EventSchema, SchemaError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading event schema from file");
            EventSchema::from_path(path)
        }
        None => EventSchema::embedded(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Environment;
    use core_config::{app_info, server::ServerConfig};

    pub(crate) fn memory_config() -> Config {
        Config {
            app: app_info!(),
            environment: Environment::Development,
            server: ServerConfig::default(),
            store: StoreConfig::Memory,
            schema_path: None,
            cors_allowed_origin: None,
        }
    }

    #[test]
    fn test_load_schema_defaults_to_embedded() {
        assert!(load_schema(None).is_ok());
    }

    #[test]
    fn test_load_schema_missing_file_fails() {
        let err = load_schema(Some(Path::new("/nonexistent/event.jtd.json"))).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }

    #[tokio::test]
    async fn test_connect_memory_store() {
        let state = AppState::connect(memory_config()).await.unwrap();

        assert_eq!(state.store_name(), "memory");
        state.events.health().await.unwrap();
        state.close().await;
    }

    #[tokio::test]
    async fn test_connect_fails_on_unreadable_schema() {
        let config = Config {
            schema_path: Some("/nonexistent/event.jtd.json".into()),
            ..memory_config()
        };

        assert!(AppState::connect(config).await.is_err());
    }
}
