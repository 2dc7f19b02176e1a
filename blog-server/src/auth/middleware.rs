//! 认证中间件
//!
//! 为 `/api/v1` 路由提供 JWT 认证

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Legacy header carrying the raw token
pub const TOKEN_HEADER: &str = "token";

/// 从请求头取出令牌
///
/// `Authorization: Bearer <token>` 优先，其次是 `token` 头。
fn token_from_headers(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let bearer = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| JwtService::extract_from_header(h).map(str::trim));
    let legacy = headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match (bearer, legacy) {
        (Some(Some(token)), _) if !token.is_empty() => Ok(Some(token)),
        (_, Some(token)) => Ok(Some(token)),
        (Some(_), None) => Err(AppError::invalid_token("Invalid authorization header")),
        (None, None) => Ok(None),
    }
}

/// 校验请求头中的令牌并解析出当前账号
pub fn authenticate(
    jwt_service: &JwtService,
    headers: &HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let Some(token) = token_from_headers(headers)? else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
        return Err(AppError::unauthorized());
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", uri)
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 认证中间件 - 要求有效令牌
///
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 | code |
/// |------|------------|------|
/// | 无令牌 | 401 | 20001 |
/// | 无效令牌 | 401 | 20001 |
/// | 令牌过期 | 401 | 20002 |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检不需要令牌
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let user = authenticate(state.get_jwt_service(), req.headers(), req.uri())?;
    tracing::debug!(username = %user.username, "Request authenticated");
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
