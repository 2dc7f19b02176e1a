//! Article API Handlers

use axum::extract::State;

use crate::api::extract::{IdPath, Payload, QueryParams};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{Article, ArticleCreate, ArticleFilter, ArticleUpdate};
use shared::{PageData, Paging};

/// GET /api/v1/articles - 按条件分页获取文章
pub async fn list(
    State(state): State<ServerState>,
    QueryParams(filter): QueryParams<ArticleFilter>,
    QueryParams(paging): QueryParams<Paging>,
) -> AppResult<ApiResponse<PageData<Article>>> {
    let page = state.articles.list_with_total(&filter, &paging).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/v1/article/{id} - 获取单篇文章 (含标签)
pub async fn get_by_id(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<Article>> {
    let article = state.articles.get(id).await?;
    Ok(ApiResponse::success(article))
}

/// POST /api/v1/article - 创建文章
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Payload(payload): Payload<ArticleCreate>,
) -> AppResult<ApiResponse<Article>> {
    let article = state.articles.add(payload).await?;
    tracing::info!(id = article.id, tag_id = article.tag_id, operator = %user.username, "Article created");
    Ok(ApiResponse::success(article))
}

/// PUT /api/v1/article/{id} - 更新文章
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    IdPath(id): IdPath,
    Payload(payload): Payload<ArticleUpdate>,
) -> AppResult<ApiResponse<Article>> {
    let article = state.articles.edit(id, payload).await?;
    tracing::info!(id, operator = %user.username, "Article updated");
    Ok(ApiResponse::success(article))
}

/// DELETE /api/v1/article/{id} - 删除文章 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    state.articles.delete(id).await?;
    tracing::info!(id, operator = %user.username, "Article deleted");
    Ok(ApiResponse::ok())
}
