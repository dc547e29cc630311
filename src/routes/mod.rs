//! HTTP route composition

pub mod health;
pub mod properties;

use axum::Router;

use crate::AppState;

/// Everything under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/availability", crate::availability::router())
        .nest("/pricing", crate::pricing::router())
        .nest("/properties", properties::router())
        .nest("/cache", health::cache_router())
        .nest("/settings", health::settings_router())
}
