//! Tag API Handlers

use axum::extract::State;

use crate::api::extract::{IdPath, Payload, QueryParams};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{Tag, TagCreate, TagFilter, TagUpdate};
use shared::{PageData, Paging};

/// GET /api/v1/tags - 按条件分页获取标签
pub async fn list(
    State(state): State<ServerState>,
    QueryParams(filter): QueryParams<TagFilter>,
    QueryParams(paging): QueryParams<Paging>,
) -> AppResult<ApiResponse<PageData<Tag>>> {
    let page = state.tags.list_with_total(&filter, &paging).await?;
    Ok(ApiResponse::success(page))
}

/// POST /api/v1/tags - 创建标签
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Payload(payload): Payload<TagCreate>,
) -> AppResult<ApiResponse<Tag>> {
    let tag = state.tags.add(payload).await?;
    tracing::info!(id = tag.id, name = %tag.name, operator = %user.username, "Tag created");
    Ok(ApiResponse::success(tag))
}

/// PUT /api/v1/tag/{id} - 更新标签
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    IdPath(id): IdPath,
    Payload(payload): Payload<TagUpdate>,
) -> AppResult<ApiResponse<Tag>> {
    let tag = state.tags.edit(id, payload).await?;
    tracing::info!(id, operator = %user.username, "Tag updated");
    Ok(ApiResponse::success(tag))
}

/// DELETE /api/v1/tag/{id} - 删除标签 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    state.tags.delete(id).await?;
    tracing::info!(id, operator = %user.username, "Tag deleted");
    Ok(ApiResponse::ok())
}
