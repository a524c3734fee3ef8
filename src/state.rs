use std::sync::Arc;

use crate::config::AppConfig;
use crate::middleware::RateLimiter;
use crate::store::ArticleStore;

/// The shared application state.
///
/// Built once at startup and handed to every handler and stateful middleware
/// through axum's `State` extractor. Cloning is cheap: every field is a
/// handle to shared data.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the external tax professional store.
    pub db: sqlx::SqlitePool,
    /// The in-memory article store.
    pub articles: ArticleStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Global per-IP rate limiter.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Creates the state from a connected pool and the loaded configuration.
    ///
    /// The article store is seeded with the demo fixtures when
    /// `articles.seed_fixtures` is set.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let articles =
            if config.articles.seed_fixtures { ArticleStore::with_fixtures() } else { ArticleStore::new() };
        Self::with_store(db, config, articles)
    }

    pub fn with_store(db: sqlx::SqlitePool, config: AppConfig, articles: ArticleStore) -> Self {
        let rate_limiter = RateLimiter::from_config(&config.rate_limit);
        Self { db, articles, config: Arc::new(config), rate_limiter }
    }
}
