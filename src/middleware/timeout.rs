use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Bounds total handler time. When the deadline fires the in-flight future
/// is dropped and the client gets a 504; a database query already sent is
/// not cancelled on the server side.
pub async fn request_timeout(State(limit): State<Duration>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(%path, timeout_ms = limit.as_millis() as u64, "request timed out");
            AppError::Timeout.into_response()
        }
    }
}
