use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_optional, env_parse_or_default,
    server::ServerConfig,
};
use database::mongodb::MongoConfig;
use database::postgres::PostgresConfig;
use std::path::PathBuf;
use strum::{Display, EnumString};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where ingested events are persisted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventStoreKind {
    Postgres,
    #[strum(to_string = "mongodb", serialize = "mongo")]
    Mongodb,
    Memory,
}

/// Connection settings for the selected backend only
#[derive(Clone, Debug)]
pub enum StoreConfig {
    Postgres(PostgresConfig),
    Mongodb(MongoConfig),
    Memory,
}

impl StoreConfig {
    pub fn kind(&self) -> EventStoreKind {
        match self {
            StoreConfig::Postgres(_) => EventStoreKind::Postgres,
            StoreConfig::Mongodb(_) => EventStoreKind::Mongodb,
            StoreConfig::Memory => EventStoreKind::Memory,
        }
    }
}

impl FromEnv for StoreConfig {
    /// `EVENT_STORE` picks the backend (default `postgres`); only that
    /// backend's variables are read.
    fn from_env() -> Result<Self, ConfigError> {
        let kind: EventStoreKind = env_parse_or_default("EVENT_STORE", "postgres")?;

        Ok(match kind {
            EventStoreKind::Postgres => StoreConfig::Postgres(PostgresConfig::from_env()?),
            EventStoreKind::Mongodb => StoreConfig::Mongodb(MongoConfig::from_env()?),
            EventStoreKind::Memory => StoreConfig::Memory,
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    /// JTD schema file overriding the embedded event schema
    pub schema_path: Option<PathBuf>,
    /// Comma-separated allowed origins; unset allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let store = StoreConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            store,
            schema_path: env_optional("EVENT_SCHEMA_PATH").map(PathBuf::from),
            cors_allowed_origin: env_optional("CORS_ALLOWED_ORIGIN"),
        })
    }
}
