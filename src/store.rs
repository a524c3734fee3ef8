//! In-memory article store.
//!
//! The store owns an ordered `Vec<Article>` behind a single `RwLock`. Every
//! operation is one critical section, so list, insert, get, remove and
//! replace never interleave. Concurrent writers to the same id resolve as
//! last-writer-wins.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::Article;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("article {0} not found")]
    NotFound(String),
}

#[derive(Clone, Default)]
pub struct ArticleStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self { articles: Arc::new(RwLock::new(articles)) }
    }

    /// The two demo articles the service ships with.
    pub fn with_fixtures() -> Self {
        Self::with_articles(vec![Article::new("1", "Hi"), Article::new("2", "sup")])
    }

    /// Stores `article` under a freshly generated id and returns that id.
    ///
    /// Whatever id the caller put on `article` is overwritten.
    pub async fn insert(&self, mut article: Article) -> String {
        let mut articles = self.articles.write().await;
        let mut id = Uuid::new_v4().to_string();
        while articles.iter().any(|a| a.id == id) {
            id = Uuid::new_v4().to_string();
        }
        article.id = id.clone();
        articles.push(article);
        id
    }

    pub async fn get(&self, id: &str) -> Result<Article, StoreError> {
        let articles = self.articles.read().await;
        articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Removes and returns the article, keeping the order of the rest.
    pub async fn remove(&self, id: &str) -> Result<Article, StoreError> {
        let mut articles = self.articles.write().await;
        match articles.iter().position(|a| a.id == id) {
            Some(idx) => Ok(articles.remove(idx)),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Overwrites the stored article that shares `article.id`.
    pub async fn replace(&self, article: Article) -> Result<Article, StoreError> {
        let mut articles = self.articles.write().await;
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(slot) => {
                *slot = article.clone();
                Ok(article)
            }
            None => Err(StoreError::NotFound(article.id)),
        }
    }

    /// Snapshot of all articles in insertion order.
    pub async fn list(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}
