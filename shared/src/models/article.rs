//! Article Model

use serde::{Deserialize, Serialize};

use super::Tag;

/// Article entity (`blog_article` row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Article {
    pub id: i64,
    pub tag_id: i64,
    // -- Relation (populated by the repository, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub tag: Option<Tag>,
    pub title: String,
    pub desc: String,
    pub content: String,
    pub cover_image_url: String,
    pub created_by: String,
    pub modified_by: String,
    /// 0 = disabled, 1 = enabled
    pub state: i32,
    pub created_at: i64,
    pub modified_at: i64,
    pub deleted_at: i64,
}

/// Create article payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleCreate {
    #[serde(default)]
    pub tag_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default)]
    pub state: i32,
}

/// Update article payload (only supplied fields change)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub tag_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub modified_by: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub state: Option<i32>,
}

/// Equality filters for listing / counting articles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleFilter {
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub tag_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub state: Option<i32>,
}
