//! Integration and unit tests for the articles-api service.
//!
//! ## Test Modules
//!
//! - **store_tests**: the in-memory article store
//! - **articles_api_tests**: the `/articles` routes end to end
//! - **admin_api_tests**: admin capability gating
//! - **taxpro_api_tests**: the tax professional lookup
//! - **health_api_tests**: liveness, readiness, version and docs
//! - **error_tests**: error mapping, panic and timeout handling
//! - **config_tests**: configuration loading and validation
//! - **db_tests**: pool setup and schema creation
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test store_tests
//! cargo test articles_api_tests
//! # etc.
//! ```

pub mod admin_api_tests;
pub mod error_tests;

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::state::AppState;

pub(crate) const ADMIN_TOKEN: &str = "test-admin-token";

/// A single-connection in-memory database. Without a schema when `init` is false.
pub(crate) async fn memory_pool(init: bool) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    if init {
        crate::db::init_db(&pool).await.unwrap();
    }
    pool
}

pub(crate) fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.admin.token = Some(ADMIN_TOKEN.to_string());
    config
}

pub(crate) async fn setup_test_app_with(config: AppConfig) -> (Router, AppState) {
    let pool = memory_pool(true).await;
    let state = AppState::new(pool, config);
    (crate::routes::router(state.clone()), state)
}

pub(crate) async fn setup_test_app() -> (Router, AppState) {
    setup_test_app_with(test_config()).await
}

pub(crate) async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub(crate) async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub(crate) async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub(crate) async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
