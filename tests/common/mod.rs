use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use booking_console::cache::AppCache;
use booking_console::config::Config;
use booking_console::AppState;

/// Config with defaults and a database that is never reached.
pub fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("postgres://localhost/booking_console_test".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Full application router over a lazily connected pool.
///
/// Only routes that never touch the database are exercised through it.
pub fn build_test_app() -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .unwrap();

    booking_console::app(AppState {
        db: pool,
        cache: AppCache::new(),
        config: Arc::new(config),
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
