//! Application setup and initialization
//!
//! All initialization logic lives here instead of main.rs: configuration
//! validation, backend construction, and route assembly.

pub mod routes;
pub mod server;
mod services;

use std::sync::Arc;

use anyhow::{Context, Result};
use intake_core::Config;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Construct credential provider and backends
    let state = services::build_state(config).await?;

    // Setup routes
    let router = routes::build_router(state.clone())?;

    Ok((state, router))
}
