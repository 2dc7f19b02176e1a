//! Auth API Handlers

use axum::extract::State;
use serde::Serialize;

use crate::api::extract::QueryParams;
use crate::core::ServerState;
use crate::services::Credentials;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// GET /auth?username=&password= - 账号换取令牌
pub async fn token(
    State(state): State<ServerState>,
    QueryParams(credentials): QueryParams<Credentials>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let token = state.auth.issue_token(&credentials).await?;
    tracing::info!(username = %credentials.username, "Token issued");
    Ok(ApiResponse::success(TokenResponse { token }))
}
