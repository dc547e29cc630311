//! Liveness and cache maintenance handlers

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub cache: CacheStats,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache: state.cache.stats(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Client-side settings the console reads on startup
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub currency: String,
    pub price_debounce_ms: u64,
    pub list_debounce_ms: u64,
}

pub async fn settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        currency: state.config.currency.clone(),
        price_debounce_ms: state.config.price_debounce.as_millis() as u64,
        list_debounce_ms: state.config.list_debounce.as_millis() as u64,
    })
}

/// Invalidate one property's cached data, or everything when no id is given
#[derive(Debug, Default, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub property_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: &'static str,
    pub property_id: Option<i64>,
}

pub async fn invalidate(
    State(state): State<AppState>,
    body: Option<Json<InvalidateRequest>>,
) -> Json<InvalidateResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    match req.property_id {
        Some(id) => {
            state.cache.invalidate_property(id).await;
            tracing::info!("Invalidated cache for property: {}", id);
            Json(InvalidateResponse {
                invalidated: "property",
                property_id: Some(id),
            })
        }
        None => {
            state.cache.invalidate_all();
            tracing::info!("Invalidated all caches");
            Json(InvalidateResponse {
                invalidated: "all",
                property_id: None,
            })
        }
    }
}

/// Cache routes, mounted under `/api/cache`
pub fn cache_router() -> Router<AppState> {
    Router::new().route("/invalidate", post(invalidate))
}

/// Settings route, mounted under `/api/settings`
pub fn settings_router() -> Router<AppState> {
    Router::new().route("/", get(settings))
}
