//! HTTP route handlers and the router that wires them together.
//!
//! - `admin`: the capability-gated admin sub-router
//! - `articles`: CRUD over the in-memory article store
//! - `health`: liveness, readiness and version endpoints
//! - `taxpro`: tax professional lookup against the relational store

pub mod admin;
pub mod articles;
pub mod health;
pub mod taxpro;

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::header,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{any, get},
    Router,
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    docs,
    error::{panic_response, AppError},
    middleware::{
        admin::{acl, admin_only},
        article_ctx::article_ctx,
        coalesce::{coalesce, Coalescer},
        paginate::paginate,
        rate_limit::rate_limit_middleware,
        timeout::request_timeout,
    },
    state::AppState,
};

/// Builds the full application router over `state`.
///
/// Layers, outermost first: request id, tracing, request id propagation,
/// compression, body limit, panic catcher, request timeout, global
/// concurrency limit, per-IP rate limit, GET/HEAD coalescing, admin ACL.
pub fn router(state: AppState) -> Router {
    let server = state.config.server.clone();

    let article_item = Router::new()
        .route(
            "/articles/{article_id}",
            get(articles::get_article).put(articles::update_article).delete(articles::delete_article),
        )
        .route_layer(from_fn_with_state(state.clone(), article_ctx));

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health::health))
        .route("/readyz", get(health::readyz))
        .route("/version", get(health::version))
        .route(
            "/articles",
            get(articles::list_articles.layer(from_fn(paginate))).post(articles::create_article),
        )
        .route("/articles/search", get(articles::search_articles))
        .merge(article_item)
        .route("/taxpro/{year}/{efin}", get(taxpro::get_taxpro))
        .nest("/admin", admin::router())
        // The nested fallback's catch-all does not match an empty tail
        .route("/admin/", any(not_found).layer(from_fn(admin_only)))
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), acl))
        .layer(from_fn_with_state(Coalescer::new(), coalesce))
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(GlobalConcurrencyLimitLayer::new(server.concurrency_limit))
        .layer(from_fn_with_state(server.request_timeout(), request_timeout))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    // CORS: permissive in debug mode for local tooling, same-origin otherwise
    if server.debug {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn index() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], docs::markdown())
}

pub(crate) async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}
