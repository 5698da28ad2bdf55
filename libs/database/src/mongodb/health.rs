use ::mongodb::{bson::doc, Client};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Send `{ ping: 1 }` to the admin database.
pub async fn check_health(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("MongoDB: {}", e)))?;

    debug!("MongoDB health check passed");
    Ok(())
}
