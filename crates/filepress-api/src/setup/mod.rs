//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use filepress_core::Config;
use filepress_processing::{PipelineConfig, UploadPipeline};
use filepress_storage::LocalStorage;
use std::sync::Arc;

/// Initialize tracing, storage, and routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_tracing(config.log_format)?;

    tracing::info!(
        environment = %config.environment,
        production = config.is_production(),
        upload_folder = %config.upload_folder.display(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config).await?;
    let router = routes::setup_routes(&state.config, state.clone());

    Ok((state, router))
}

/// Create the storage root and the upload pipeline over it.
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    config.validate().context("Configuration validation failed")?;

    let storage = LocalStorage::new(config.upload_folder.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload folder {}",
                config.upload_folder.display()
            )
        })?;

    let pipeline = UploadPipeline::new(Arc::new(storage), PipelineConfig::from(&config));

    Ok(Arc::new(AppState::new(config, pipeline)))
}
