use ::mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::{check_health, MongoConfig};
use crate::common::{retry, retry_with_backoff, DatabaseError, DatabaseResult, RetryConfig};

/// Build a client from `config` and ping the server once.
///
/// The driver connects lazily, so the ping is what surfaces an unreachable
/// server at startup instead of on the first request.
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options)?;

    check_health(&client)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    let attempt = || connect_from_config(config);

    match retry_config {
        Some(policy) => retry_with_backoff("MongoDB connect", attempt, policy).await,
        None => retry("MongoDB connect", attempt).await,
    }
}
