//! Storage backend setup.

use anyhow::{Context, Result};
use imghost_core::Config;
use imghost_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the local filesystem storage for uploaded images.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.images_dir.clone())
        .await
        .with_context(|| format!("Failed to create storage at {}", config.images_dir.display()))?;
    tracing::info!(images_dir = %config.images_dir.display(), "Local storage ready");
    Ok(Arc::new(storage))
}
