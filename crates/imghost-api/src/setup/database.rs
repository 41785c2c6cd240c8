//! Metadata store setup.

use anyhow::Result;
use imghost_core::Config;
use imghost_db::{DisabledImageStore, ImageStore, PgImageStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

const INIT_ATTEMPTS: u32 = 5;
const INIT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Build the image store for the configured mode.
///
/// With the database disabled this returns the no-op store, so the upload
/// path keeps working without any metadata index. With it enabled, the
/// connection and schema init are retried a few times because the
/// database container often comes up after the service.
pub async fn setup_image_store(config: &Config) -> Result<Arc<dyn ImageStore>> {
    if !config.db_enabled {
        tracing::warn!("Database disabled, image metadata will not be recorded");
        return Ok(Arc::new(DisabledImageStore));
    }

    let mut last_error = None;
    for attempt in 1..=INIT_ATTEMPTS {
        match connect_and_init(config).await {
            Ok(store) => {
                tracing::info!(
                    max_connections = config.db_max_connections,
                    "Database connected and schema initialized"
                );
                return Ok(Arc::new(store));
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    attempt,
                    attempts = INIT_ATTEMPTS,
                    "Database initialization failed"
                );
                last_error = Some(err);
                if attempt < INIT_ATTEMPTS {
                    tokio::time::sleep(INIT_RETRY_DELAY).await;
                }
            }
        }
    }

    Err(anyhow::anyhow!(
        "Database initialization failed after {} attempts: {}",
        INIT_ATTEMPTS,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

async fn connect_and_init(config: &Config) -> Result<PgImageStore> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    let store = PgImageStore::new(pool);
    store.init().await?;
    Ok(store)
}
