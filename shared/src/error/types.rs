//! Error types and the response envelope

use super::codes::{ErrorCode, lookup};
use http::StatusCode;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured result code and details
///
/// - `code` selects the envelope `code`/`msg` and the HTTP status
/// - `message` is the developer-facing description (logs, `Display`)
/// - `details` become the envelope `data` (e.g. field-level validation errors)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The result code identifying the outcome
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details, rendered as the envelope payload
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create an invalid params error
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidParams, msg)
    }

    /// Create a generic failure
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Error, msg)
    }

    /// Create a token check failure (missing / malformed / bad signature)
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AuthCheckTokenFailed, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::AuthCheckTokenTimeout)
    }

    /// Create an unauthorized error (token missing)
    pub fn unauthorized() -> Self {
        Self::with_message(ErrorCode::AuthCheckTokenFailed, "Missing token")
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::AuthFailed)
    }
}

/// Unified response envelope
///
/// Every endpoint answers with:
/// ```json
/// { "code": 200, "msg": "ok", "data": { ... } }
/// ```
/// `msg` is always the registry message for `code`; `data` is `{}` when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Result code (200 for success)
    pub code: u16,
    /// Message looked up from `code`
    pub msg: String,
    /// Response payload
    #[serde(default, serialize_with = "data_or_empty")]
    pub data: Option<T>,
}

fn data_or_empty<T: Serialize, S: Serializer>(
    data: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match data {
        Some(d) => d.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

impl<T> ApiResponse<T> {
    /// Build an envelope for any code; `msg` comes from the registry
    pub fn build(code: u16, data: Option<T>) -> Self {
        Self {
            code,
            msg: lookup(code).to_string(),
            data,
        }
    }

    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self::build(ErrorCode::Success.code(), Some(data))
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self::build(ErrorCode::Success.code(), None)
    }
}

impl ApiResponse<HashMap<String, Value>> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self::build(err.code.code(), err.details.clone())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Render `(status, code, payload)` as an HTTP response carrying the envelope
pub fn envelope<T: Serialize>(
    status: StatusCode,
    code: u16,
    data: Option<T>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    (status, axum::Json(ApiResponse::build(code, data))).into_response()
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.is_system() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        envelope(self.http_status(), self.code.code(), self.details)
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = ErrorCode::try_from(self.code)
            .map(|c| c.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::TagNotFound);
        assert_eq!(err.code, ErrorCode::TagNotFound);
        assert_eq!(err.message, "tag not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::invalid_params("Validation failed")
            .with_detail("errors", serde_json::json!([{"field": "name"}]));

        assert_eq!(err.code, ErrorCode::InvalidParams);
        let details = err.details.unwrap();
        assert!(details.contains_key("errors"));
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::TagExists).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::unauthorized().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::internal("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::ArticleNotFound, "Article 7 not found");
        assert_eq!(format!("{}", err), "Article 7 not found");
    }

    #[test]
    fn test_success_envelope_serialize() {
        let response = ApiResponse::success(serde_json::json!({"total": 3}));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"]["total"], 3);
    }

    #[test]
    fn test_empty_data_serializes_as_object() {
        let json = serde_json::to_value(ApiResponse::<()>::ok()).unwrap();
        assert_eq!(json["data"], serde_json::json!({}));
    }

    #[test]
    fn test_error_envelope_uses_registry_message() {
        let err = AppError::with_message(ErrorCode::TagExists, "Tag 'golang' already exists");
        let json = serde_json::to_value(ApiResponse::error(&err)).unwrap();
        assert_eq!(json["code"], 10001);
        assert_eq!(json["msg"], "tag name already exists");
        assert_eq!(json["data"], serde_json::json!({}));
    }

    #[test]
    fn test_unknown_code_envelope() {
        let json = serde_json::to_value(ApiResponse::<()>::build(4242, None)).unwrap();
        assert_eq!(json["msg"], "unknown error");
    }

    #[test]
    fn test_envelope_deserialize() {
        let json = r#"{"code":200,"msg":"ok","data":{"token":"abc"}}"#;
        let response: ApiResponse<Value> = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.data.unwrap()["token"], "abc");
    }
}
