//! Read-only HTTP API over the hearth warehouse.
//!
//! One retrieval endpoint per metric category plus a default-range endpoint.
//! The handlers are thin: fetch, optionally filter through `hearth-core`,
//! serialize. All rendering happens client-side.

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use hearth_warehouse::Warehouse;

pub struct AppState {
    pub warehouse: Warehouse,
}

/// Build the application router over an opened warehouse.
pub fn app(state: Arc<AppState>) -> Router {
    api::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
