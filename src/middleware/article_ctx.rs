use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::types::Article;

/// The article resolved for the current request by [`article_ctx`].
///
/// Handlers take it as an extractor. Reaching a handler without it means the
/// route was registered without the middleware; that fails the request with
/// a 500 instead of panicking.
#[derive(Debug, Clone)]
pub struct CurrentArticle(pub Article);

impl<S> FromRequestParts<S> for CurrentArticle
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentArticle>()
            .cloned()
            .ok_or(AppError::MissingContext("article"))
    }
}

/// Loads the article named by the `{article_id}` path segment and attaches it
/// to the request. Unknown ids stop here with a 404.
pub async fn article_ctx(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let article = state.articles.get(&article_id).await?;
    req.extensions_mut().insert(CurrentArticle(article));
    Ok(next.run(req).await)
}
