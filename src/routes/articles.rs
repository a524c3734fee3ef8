use axum::{body::Bytes, extract::State, Json};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    middleware::CurrentArticle,
    state::AppState,
    types::{Article, ArticleChanges, NewArticle},
};

/// Decodes a JSON body whatever its `Content-Type`.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("Request body is empty".into()));
    }
    Ok(serde_json::from_slice(body)?)
}

pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<Article>> {
    Json(state.articles.list().await)
}

// Stub: a real search would filter on query parameters.
pub async fn search_articles(State(state): State<AppState>) -> Json<Vec<Article>> {
    Json(state.articles.list().await)
}

/// Stores the posted article under a server-assigned id. Any `id` in the
/// body is ignored.
pub async fn create_article(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Article>> {
    let new: NewArticle = parse_body(&body)?;
    let mut article = Article::from(new);
    article.id = state.articles.insert(article.clone()).await;
    tracing::info!(id = %article.id, "article created");
    Ok(Json(article))
}

pub async fn get_article(CurrentArticle(article): CurrentArticle) -> Json<Article> {
    Json(article)
}

/// Merges the body over the current article and writes the result back to
/// the store. The id is immutable; an `id` in the body is ignored. If the
/// article was deleted between lookup and write, the update fails with 404.
pub async fn update_article(
    State(state): State<AppState>,
    CurrentArticle(current): CurrentArticle,
    body: Bytes,
) -> AppResult<Json<Article>> {
    let changes: ArticleChanges = parse_body(&body)?;
    let updated = state.articles.replace(current.apply(changes)).await?;
    Ok(Json(updated))
}

pub async fn delete_article(
    State(state): State<AppState>,
    CurrentArticle(current): CurrentArticle,
) -> AppResult<Json<Article>> {
    let removed = state.articles.remove(&current.id).await?;
    tracing::info!(id = %removed.id, "article deleted");
    Ok(Json(removed))
}
