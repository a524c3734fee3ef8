use axum::{
    extract::{rejection::QueryRejection, Query, Request},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// Paging hints a client may send with a list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Records the requested page on the request and passes it through.
///
/// Nothing downstream filters on it yet; the list handler returns everything.
/// Unparseable hints are ignored rather than rejected.
pub async fn paginate(
    query: Result<Query<Pagination>, QueryRejection>,
    mut req: Request,
    next: Next,
) -> Response {
    let pagination = query.map(|Query(p)| p).unwrap_or_default();
    if pagination != Pagination::default() {
        tracing::debug!(page = ?pagination.page, per_page = ?pagination.per_page, "pagination requested");
    }
    req.extensions_mut().insert(pagination);
    next.run(req).await
}
