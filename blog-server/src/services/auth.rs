//! 登录换取令牌

use std::sync::Arc;

use serde::Deserialize;
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::auth::password::verify_password;
use crate::db::repository::auth;
use crate::security_log;
use crate::utils::validation::{FieldValue, Form, Rule, RuleSet, validate};

const CREDENTIAL_RULES: RuleSet = &[
    ("username", &[Rule::Required, Rule::MaxSize(50)]),
    ("password", &[Rule::Required, Rule::MaxSize(50)]),
];

/// `GET /auth` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Form for Credentials {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "username" => Some(FieldValue::Str(&self.username)),
            "password" => Some(FieldValue::Str(&self.password)),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self { pool, jwt_service }
    }

    /// Verify the account and sign a token for it
    pub async fn issue_token(&self, credentials: &Credentials) -> AppResult<String> {
        let result = validate(credentials, CREDENTIAL_RULES);
        if !result.is_valid() {
            tracing::info!(errors = %result.details(), "Validation failed");
        }
        result.into_result()?;

        let hash = auth::find_password_hash(&self.pool, &credentials.username)
            .await
            .map_err(|e| {
                tracing::error!(target: "database", error = %e, "Account lookup failed");
                AppError::new(ErrorCode::AuthFailed)
            })?;

        let verified = hash
            .as_deref()
            .is_some_and(|h| verify_password(&credentials.password, h));
        if !verified {
            security_log!(
                "WARN",
                "login_failed",
                username = credentials.username.as_str()
            );
            return Err(AppError::invalid_credentials());
        }

        self.jwt_service
            .generate_token(&credentials.username)
            .map_err(|e| {
                tracing::error!(error = %e, "Token generation failed");
                AppError::new(ErrorCode::AuthTokenFailed)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use crate::auth::password::hash_password;
    use crate::db::repository::test_support;

    async fn service() -> AuthService {
        let pool = test_support::pool().await;
        auth::upsert(&pool, "admin", &hash_password("s3cret").unwrap())
            .await
            .unwrap();
        let jwt = JwtService::with_config(JwtConfig {
            secret: "a-test-secret-that-is-long-enough-123".to_string(),
            expiration_minutes: 60,
            issuer: "blog-server".to_string(),
        });
        AuthService::new(pool, Arc::new(jwt))
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_issue_token_for_valid_account() {
        let service = service().await;
        let token = service.issue_token(&creds("admin", "s3cret")).await.unwrap();
        let claims = service.jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.username, "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_or_unknown_user() {
        let service = service().await;
        for c in [creds("admin", "nope"), creds("ghost", "s3cret")] {
            let err = service.issue_token(&c).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::AuthFailed);
        }
    }

    #[tokio::test]
    async fn test_missing_fields_are_invalid_params() {
        let service = service().await;
        let err = service.issue_token(&creds("", "")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
    }
}
