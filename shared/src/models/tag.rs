//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity (`blog_tag` row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// 0 = disabled, 1 = enabled
    pub state: i32,
    pub created_by: String,
    pub modified_by: String,
    pub created_at: i64,
    pub modified_at: i64,
    /// 0 while live, deletion time (Unix seconds) once soft-deleted
    pub deleted_at: i64,
}

/// Create tag payload
///
/// Missing fields default to empty values so that validation, not
/// deserialization, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub state: i32,
}

/// Update tag payload (only supplied fields change)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagUpdate {
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub modified_by: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub state: Option<i32>,
}

/// Equality filters for listing / counting tags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagFilter {
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub state: Option<i32>,
}
