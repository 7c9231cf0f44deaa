//! Application setup and wiring

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::infrastructure::{AdapterRegistry, HarborAdapter};
use crate::presentation::{AppState, create_router};

/// Errors that can occur while wiring the application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown registry backend: {0}")]
    UnknownBackend(String),

    #[error("failed to build registry client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the adapter registry, select the configured backend, and
/// assemble the router.
pub fn create_app(config: &Config) -> Result<Router, AppError> {
    let timeout = Duration::from_secs(config.registry.request_timeout_seconds);

    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(HarborAdapter::new(timeout)?));

    let adapter = registry
        .get(&config.registry.kind)
        .ok_or_else(|| AppError::UnknownBackend(config.registry.kind.clone()))?;
    info!(
        selected = adapter.kind(),
        available = ?registry.registered(),
        "registry backend selected"
    );

    // The global recorder installs once per process; later instances
    // (tests) fall back to a detached handle.
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(_) => PrometheusBuilder::new().build_recorder().handle(),
    };
    crate::metrics::describe_all();

    let state = AppState {
        adapter,
        registry_url: config.registry.url.clone(),
        metrics,
    };

    Ok(create_router(state, config))
}
