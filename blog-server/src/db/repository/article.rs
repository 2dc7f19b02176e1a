//! Article Repository
//!
//! Reads eager-load the associated live tag into `Article::tag`.

use super::{RepoResult, ResourceStore, supplied, tag};
use async_trait::async_trait;
use shared::models::{Article, ArticleCreate, ArticleFilter, ArticleUpdate};
use shared::{ErrorCode, PageWindow};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;

const COLUMNS: &str = "id, tag_id, title, \"desc\", content, cover_image_url, created_by, \
                       modified_by, state, created_at, modified_at, deleted_at";

#[derive(Clone)]
pub struct ArticleStore {
    pool: SqlitePool,
}

impl ArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn tag_is_live(&self, tag_id: i64) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM blog_tag WHERE id = ? AND deleted_at = 0 LIMIT 1",
        )
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    async fn attach_tags(&self, articles: &mut [Article]) -> RepoResult<()> {
        let mut ids: Vec<i64> = articles.iter().map(|a| a.tag_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let tags: HashMap<i64, _> = tag::find_live_by_ids(&self.pool, &ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();
        for article in articles.iter_mut() {
            article.tag = tags.get(&article.tag_id).cloned();
        }
        Ok(())
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ArticleFilter) {
    qb.push(" WHERE deleted_at = 0");
    if let Some(tag_id) = filter.tag_id {
        qb.push(" AND tag_id = ").push_bind(tag_id);
    }
    if let Some(state) = filter.state {
        qb.push(" AND state = ").push_bind(state);
    }
}

#[async_trait]
impl ResourceStore for ArticleStore {
    type Entity = Article;
    type Filter = ArticleFilter;
    type Create = ArticleCreate;
    type Update = ArticleUpdate;

    async fn count(&self, filter: &ArticleFilter) -> RepoResult<i64> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM blog_article");
        push_filter(&mut qb, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn find(
        &self,
        filter: &ArticleFilter,
        window: Option<PageWindow>,
    ) -> RepoResult<Vec<Article>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM blog_article"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        if let Some(window) = window {
            qb.push(" LIMIT ").push_bind(window.limit);
            qb.push(" OFFSET ").push_bind(window.offset);
        }
        let mut articles = qb.build_query_as::<Article>().fetch_all(&self.pool).await?;
        self.attach_tags(&mut articles).await?;
        Ok(articles)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {COLUMNS} FROM blog_article WHERE id = ? AND deleted_at = 0"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match article {
            Some(article) => {
                let mut found = [article];
                self.attach_tags(&mut found).await?;
                let [article] = found;
                Ok(Some(article))
            }
            None => Ok(None),
        }
    }

    async fn exists_by_id(&self, id: i64) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM blog_article WHERE id = ? AND deleted_at = 0 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    async fn create(&self, data: &ArticleCreate, now: i64) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO blog_article \
             (tag_id, title, \"desc\", content, cover_image_url, created_by, state, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(data.tag_id)
        .bind(&data.title)
        .bind(&data.desc)
        .bind(&data.content)
        .bind(&data.cover_image_url)
        .bind(&data.created_by)
        .bind(data.state)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, data: &ArticleUpdate, now: i64) -> RepoResult<bool> {
        let rows = sqlx::query(
            "UPDATE blog_article SET tag_id = COALESCE(?, tag_id), title = COALESCE(?, title), \
             \"desc\" = COALESCE(?, \"desc\"), content = COALESCE(?, content), \
             cover_image_url = COALESCE(?, cover_image_url), state = COALESCE(?, state), \
             modified_by = COALESCE(?, modified_by), modified_at = ? \
             WHERE id = ? AND deleted_at = 0",
        )
        .bind(data.tag_id)
        .bind(supplied(&data.title))
        .bind(supplied(&data.desc))
        .bind(supplied(&data.content))
        .bind(supplied(&data.cover_image_url))
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
        let rows =
            sqlx::query("UPDATE blog_article SET deleted_at = ? WHERE id = ? AND deleted_at = 0")
                .bind(now)
                .bind(id)
                .execute(&self.pool)
                .await?
                .rows_affected();
        Ok(rows > 0)
    }

    /// Physically removes every live article row
    async fn purge(&self) -> RepoResult<u64> {
        let rows = sqlx::query("DELETE FROM blog_article WHERE deleted_at = 0")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn add_conflict(&self, data: &ArticleCreate) -> RepoResult<Option<ErrorCode>> {
        if !self.tag_is_live(data.tag_id).await? {
            return Ok(Some(ErrorCode::TagNotFound));
        }
        Ok(None)
    }

    async fn edit_conflict(&self, _id: i64, data: &ArticleUpdate) -> RepoResult<Option<ErrorCode>> {
        if let Some(tag_id) = data.tag_id
            && !self.tag_is_live(tag_id).await?
        {
            return Ok(Some(ErrorCode::TagNotFound));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{TagStore, test_support};
    use shared::models::TagCreate;

    async fn seed_tag(pool: &SqlitePool, name: &str) -> i64 {
        TagStore::new(pool.clone())
            .create(
                &TagCreate {
                    name: name.to_string(),
                    created_by: "alice".to_string(),
                    state: 1,
                },
                1,
            )
            .await
            .unwrap()
    }

    fn create(tag_id: i64, title: &str) -> ArticleCreate {
        ArticleCreate {
            tag_id,
            title: title.to_string(),
            desc: "desc".to_string(),
            content: "content".to_string(),
            created_by: "alice".to_string(),
            cover_image_url: "http://img/cover.png".to_string(),
            state: 1,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_loads_tag() {
        let pool = test_support::pool().await;
        let tag_id = seed_tag(&pool, "golang").await;
        let store = ArticleStore::new(pool);

        let id = store.create(&create(tag_id, "hello"), 10).await.unwrap();
        let article = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(article.title, "hello");
        assert_eq!(article.desc, "desc");
        assert_eq!(article.tag.as_ref().map(|t| t.name.as_str()), Some("golang"));
    }

    #[tokio::test]
    async fn test_add_conflict_requires_live_tag() {
        let pool = test_support::pool().await;
        let tag_id = seed_tag(&pool, "golang").await;
        let store = ArticleStore::new(pool);

        assert_eq!(store.add_conflict(&create(tag_id, "a")).await.unwrap(), None);
        assert_eq!(
            store.add_conflict(&create(tag_id + 1, "a")).await.unwrap(),
            Some(ErrorCode::TagNotFound)
        );
    }

    #[tokio::test]
    async fn test_filter_by_tag() {
        let pool = test_support::pool().await;
        let go = seed_tag(&pool, "golang").await;
        let rust = seed_tag(&pool, "rust").await;
        let store = ArticleStore::new(pool);
        store.create(&create(go, "a"), 1).await.unwrap();
        store.create(&create(rust, "b"), 1).await.unwrap();
        store.create(&create(rust, "c"), 1).await.unwrap();

        let filter = ArticleFilter {
            tag_id: Some(rust),
            state: None,
        };
        assert_eq!(store.count(&filter).await.unwrap(), 2);
        let found = store.find(&filter, None).await.unwrap();
        assert!(found.iter().all(|a| a.tag_id == rust && a.tag.is_some()));
    }

    #[tokio::test]
    async fn test_purge_removes_live_rows() {
        let pool = test_support::pool().await;
        let tag_id = seed_tag(&pool, "golang").await;
        let store = ArticleStore::new(pool);
        store.create(&create(tag_id, "a"), 1).await.unwrap();
        store.create(&create(tag_id, "b"), 1).await.unwrap();

        assert_eq!(store.purge().await.unwrap(), 2);
        assert_eq!(store.count(&ArticleFilter::default()).await.unwrap(), 0);
    }
}
