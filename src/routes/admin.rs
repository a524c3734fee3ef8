use axum::{extract::Path, middleware::from_fn, routing::get, Router};

use crate::middleware::admin::admin_only;
use crate::state::AppState;

/// Administrator routes, mounted under `/admin`. Every path below the
/// mount point requires the admin capability, unknown ones included, so
/// callers without it cannot tell which admin routes exist.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/accounts", get(accounts))
        .route("/users/{user_id}", get(view_user))
        .fallback(super::not_found)
        .layer(from_fn(admin_only))
}

pub async fn index() -> &'static str {
    "admin: index"
}

pub async fn accounts() -> &'static str {
    "admin: list accounts.."
}

pub async fn view_user(Path(user_id): Path<String>) -> String {
    format!("admin: view user id {}", user_id)
}
