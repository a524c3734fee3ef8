//! # articles-api
//!
//! A REST service over an in-memory articles resource, plus a lookup
//! endpoint for tax professionals backed by a relational store.
//!
//! ## Architecture
//!
//! - **Axum** routes requests and composes middleware
//! - **tower / tower-http** supply the global layers (tracing, request ids,
//!   panic catching, concurrency limiting)
//! - **SQLx** runs the tax professional query against SQLite
//! - **Tokio** runs one task per request
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded TOML, local file, environment)
//! - [`db`]: pool setup and schema for the tax professional store
//! - [`docs`]: Markdown route documentation served at `/`
//! - [`error`]: centralized error type and JSON error responses
//! - [`middleware`]: article context, admin gate, pagination, rate limit, timeout
//! - [`routes`]: HTTP handlers and the application router
//! - [`state`]: shared application state
//! - [`store`]: the lock-guarded in-memory article store
//! - [`taxpro`]: the tax professional query
//! - [`types`]: wire types

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod taxpro;
pub mod types;

#[cfg(test)]
mod tests;
