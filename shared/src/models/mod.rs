//! Data models
//!
//! Shared between blog-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod article;
pub mod tag;

// Re-exports
pub use article::*;
pub use tag::*;
