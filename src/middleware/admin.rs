use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Whether the caller may use the admin routes. Set by [`acl`] on every
/// request and read by [`admin_only`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminCapability(pub bool);

/// Resolves the admin capability from `Authorization: Bearer <token>`.
///
/// The capability is recomputed for every request, so a value smuggled in by
/// an inner service cannot survive. With no `admin.token` configured nobody
/// is an admin.
pub async fn acl(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let is_admin = match state.config.admin.token.as_deref() {
        Some(expected) if !expected.is_empty() => req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|provided| constant_time_eq(provided.as_bytes(), expected.as_bytes()))
            .unwrap_or(false),
        _ => false,
    };
    req.extensions_mut().insert(AdminCapability(is_admin));
    next.run(req).await
}

/// Restricts a route group to callers holding the admin capability.
pub async fn admin_only(req: Request, next: Next) -> Response {
    let allowed = req.extensions().get::<AdminCapability>().map(|c| c.0).unwrap_or(false);
    if !allowed {
        tracing::warn!(path = %req.uri().path(), "admin route refused");
        return AppError::Forbidden("Forbidden".to_string()).into_response();
    }
    next.run(req).await
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
