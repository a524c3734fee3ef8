//! Middleware components for HTTP request processing.
//!
//! Route-scoped stages (`article_ctx`, `paginate`, `admin_only`) sit in front
//! of individual handlers; the rest are layered over the whole router.

pub mod admin;
pub mod article_ctx;
pub mod coalesce;
pub mod ip;
pub mod paginate;
pub mod rate_limit;
pub mod timeout;

pub use admin::AdminCapability;
pub use article_ctx::CurrentArticle;
pub use coalesce::Coalescer;
pub use rate_limit::RateLimiter;
