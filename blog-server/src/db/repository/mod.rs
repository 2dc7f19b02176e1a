//! Repository Module
//!
//! Table adapters over SQLite. Every default read is restricted to live rows
//! (`deleted_at = 0`); "no row" is reported as `None`/`false`, never as an error.

pub mod article;
pub mod auth;
pub mod tag;

// Re-exports
pub use article::ArticleStore;
pub use tag::TagStore;

use async_trait::async_trait;
use serde::Serialize;
use shared::{ErrorCode, PageWindow};
use thiserror::Error;

use crate::utils::validation::Form;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Text of a partial update; blank strings leave the column unchanged
pub(crate) fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Storage operations shared by every soft-deletable resource
///
/// The conflict hooks run before a mutation and report the result code of a
/// failed existence/uniqueness check (e.g. duplicate name, missing tag).
#[async_trait]
pub trait ResourceStore: Send + Sync {
    type Entity: Serialize + Send + Sync;
    type Filter: Form + Send + Sync;
    type Create: Form + Send + Sync;
    type Update: Form + Send + Sync;

    /// Live rows matching the filter
    async fn count(&self, filter: &Self::Filter) -> RepoResult<i64>;

    /// Live rows matching the filter, ordered by id, optionally windowed
    async fn find(
        &self,
        filter: &Self::Filter,
        window: Option<PageWindow>,
    ) -> RepoResult<Vec<Self::Entity>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Self::Entity>>;

    async fn exists_by_id(&self, id: i64) -> RepoResult<bool>;

    /// Insert a row stamped with `now`, returning its id
    async fn create(&self, data: &Self::Create, now: i64) -> RepoResult<i64>;

    /// Apply the supplied fields to a live row; `false` when no live row matched
    async fn update(&self, id: i64, data: &Self::Update, now: i64) -> RepoResult<bool>;

    /// Mark a live row deleted; `false` when no live row matched
    async fn soft_delete(&self, id: i64, now: i64) -> RepoResult<bool>;

    /// Physically remove rows per the resource's retention rule
    async fn purge(&self) -> RepoResult<u64>;

    async fn add_conflict(&self, _data: &Self::Create) -> RepoResult<Option<ErrorCode>> {
        Ok(None)
    }

    async fn edit_conflict(&self, _id: i64, _data: &Self::Update) -> RepoResult<Option<ErrorCode>> {
        Ok(None)
    }
}
