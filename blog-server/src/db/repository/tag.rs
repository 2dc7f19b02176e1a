//! Tag Repository

use super::{RepoResult, ResourceStore, supplied};
use async_trait::async_trait;
use shared::models::{Tag, TagCreate, TagFilter, TagUpdate};
use shared::{ErrorCode, PageWindow};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "id, name, state, created_by, modified_by, created_at, modified_at, deleted_at";

#[derive(Clone)]
pub struct TagStore {
    pool: SqlitePool,
}

impl TagStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether a live tag carries this exact name
    pub async fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM blog_tag WHERE name = ? AND deleted_at = 0 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    /// Whether a live tag other than `id` carries this name
    async fn name_taken_by_other(&self, name: &str, id: i64) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM blog_tag WHERE name = ? AND id != ? AND deleted_at = 0 LIMIT 1",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }
}

/// Live tags with the given ids (missing or deleted ids are skipped)
pub async fn find_live_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Tag>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {COLUMNS} FROM blog_tag WHERE deleted_at = 0 AND id IN ("
    ));
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    let tags = qb.build_query_as::<Tag>().fetch_all(pool).await?;
    Ok(tags)
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TagFilter) {
    qb.push(" WHERE deleted_at = 0");
    if let Some(name) = &filter.name {
        qb.push(" AND name = ").push_bind(name.clone());
    }
    if let Some(state) = filter.state {
        qb.push(" AND state = ").push_bind(state);
    }
}

#[async_trait]
impl ResourceStore for TagStore {
    type Entity = Tag;
    type Filter = TagFilter;
    type Create = TagCreate;
    type Update = TagUpdate;

    async fn count(&self, filter: &TagFilter) -> RepoResult<i64> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM blog_tag");
        push_filter(&mut qb, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn find(&self, filter: &TagFilter, window: Option<PageWindow>) -> RepoResult<Vec<Tag>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM blog_tag"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        if let Some(window) = window {
            qb.push(" LIMIT ").push_bind(window.limit);
            qb.push(" OFFSET ").push_bind(window.offset);
        }
        let tags = qb.build_query_as::<Tag>().fetch_all(&self.pool).await?;
        Ok(tags)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(&format!(
            "SELECT {COLUMNS} FROM blog_tag WHERE id = ? AND deleted_at = 0"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tag)
    }

    async fn exists_by_id(&self, id: i64) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM blog_tag WHERE id = ? AND deleted_at = 0 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    async fn create(&self, data: &TagCreate, now: i64) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO blog_tag (name, state, created_by, created_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&data.name)
        .bind(data.state)
        .bind(&data.created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, data: &TagUpdate, now: i64) -> RepoResult<bool> {
        let rows = sqlx::query(
            "UPDATE blog_tag SET name = COALESCE(?, name), state = COALESCE(?, state), \
             modified_by = COALESCE(?, modified_by), modified_at = ? \
             WHERE id = ? AND deleted_at = 0",
        )
        .bind(supplied(&data.name))
        .bind(data.state)
        .bind(supplied(&data.modified_by))
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(rows > 0)
    }

    async fn soft_delete(&self, id: i64, now: i64) -> RepoResult<bool> {
        let rows = sqlx::query("UPDATE blog_tag SET deleted_at = ? WHERE id = ? AND deleted_at = 0")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    /// Removes soft-deleted tags; live tags are never purged
    async fn purge(&self) -> RepoResult<u64> {
        let rows = sqlx::query("DELETE FROM blog_tag WHERE deleted_at != 0")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn add_conflict(&self, data: &TagCreate) -> RepoResult<Option<ErrorCode>> {
        if self.exists_by_name(&data.name).await? {
            return Ok(Some(ErrorCode::TagExists));
        }
        Ok(None)
    }

    async fn edit_conflict(&self, id: i64, data: &TagUpdate) -> RepoResult<Option<ErrorCode>> {
        if let Some(name) = supplied(&data.name)
            && self.name_taken_by_other(name, id).await?
        {
            return Ok(Some(ErrorCode::TagExists));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{RepoError, test_support};

    fn create(name: &str) -> TagCreate {
        TagCreate {
            name: name.to_string(),
            created_by: "alice".to_string(),
            state: 1,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = TagStore::new(test_support::pool().await);
        let id = store.create(&create("golang"), 100).await.unwrap();

        let tag = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(tag.name, "golang");
        assert_eq!(tag.created_at, 100);
        assert_eq!(tag.deleted_at, 0);
        assert!(store.exists_by_name("golang").await.unwrap());
        assert!(!store.exists_by_name("rust").await.unwrap());
    }

    #[tokio::test]
    async fn test_live_name_is_unique_at_store_level() {
        let store = TagStore::new(test_support::pool().await);
        store.create(&create("golang"), 1).await.unwrap();

        let err = store.create(&create("golang"), 2).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_deleted_name_can_be_reused() {
        let store = TagStore::new(test_support::pool().await);
        let id = store.create(&create("golang"), 1).await.unwrap();
        assert!(store.soft_delete(id, 2).await.unwrap());

        assert!(!store.exists_by_name("golang").await.unwrap());
        assert!(store.create(&create("golang"), 3).await.is_ok());
    }

    #[tokio::test]
    async fn test_filter_and_window() {
        let store = TagStore::new(test_support::pool().await);
        for i in 0..5 {
            let mut data = create(&format!("tag-{i}"));
            data.state = i % 2;
            store.create(&data, 1).await.unwrap();
        }

        let enabled = TagFilter {
            name: None,
            state: Some(1),
        };
        assert_eq!(store.count(&enabled).await.unwrap(), 2);

        let page = store
            .find(
                &TagFilter::default(),
                Some(PageWindow {
                    limit: 2,
                    offset: 2,
                }),
            )
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["tag-2", "tag-3"]);
    }

    #[tokio::test]
    async fn test_update_only_supplied_fields() {
        let store = TagStore::new(test_support::pool().await);
        let id = store.create(&create("golang"), 1).await.unwrap();

        let update = TagUpdate {
            name: None,
            modified_by: Some("bob".to_string()),
            state: Some(0),
        };
        assert!(store.update(id, &update, 5).await.unwrap());

        let tag = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(tag.name, "golang");
        assert_eq!(tag.state, 0);
        assert_eq!(tag.modified_by, "bob");
        assert_eq!(tag.modified_at, 5);
        assert!(!store.update(999, &update, 5).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_update_keeps_name() {
        let store = TagStore::new(test_support::pool().await);
        let id = store.create(&create("golang"), 1).await.unwrap();

        let update = TagUpdate {
            name: Some("  ".to_string()),
            modified_by: Some("bob".to_string()),
            state: None,
        };
        assert!(store.update(id, &update, 5).await.unwrap());
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().name, "golang");
    }

    #[tokio::test]
    async fn test_purge_only_removes_deleted_tags() {
        let pool = test_support::pool().await;
        let store = TagStore::new(pool.clone());
        let keep = store.create(&create("keep"), 1).await.unwrap();
        let gone = store.create(&create("gone"), 1).await.unwrap();
        store.soft_delete(gone, 2).await.unwrap();

        assert_eq!(store.purge().await.unwrap(), 1);
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_tag")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert!(store.exists_by_id(keep).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_live_by_ids() {
        let pool = test_support::pool().await;
        let store = TagStore::new(pool.clone());
        let a = store.create(&create("a"), 1).await.unwrap();
        let b = store.create(&create("b"), 1).await.unwrap();
        store.soft_delete(b, 2).await.unwrap();

        let tags = find_live_by_ids(&pool, &[a, b, 42]).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, a);
        assert!(find_live_by_ids(&pool, &[]).await.unwrap().is_empty());
    }
}
