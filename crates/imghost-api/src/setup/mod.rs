//! Application setup and initialization
//!
//! Initialization logic lives here instead of main.rs so integration
//! tests can assemble the same router against test doubles.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use imghost_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry();

    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated");

    let images = database::setup_image_store(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), storage, images));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
