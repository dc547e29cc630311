//! Availability and pricing engine for the rental booking console.

pub mod availability;
pub mod cache;
pub mod config;
pub mod db;
pub mod debounce;
pub mod error;
pub mod listing;
pub mod models;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::AppCache;
use crate::config::Config;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

/// Full application router with its middleware stack
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
