//! Request extractors
//!
//! Thin wrappers over axum's `Json`, `Query` and `Path` that answer malformed
//! input with the `InvalidParams` envelope instead of a plain-text rejection.
//! The rejection text is carried in `data.error`.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use http::header;
use serde::de::DeserializeOwned;

use crate::utils::AppError;

fn rejected(text: String) -> AppError {
    AppError::invalid_params(text.clone()).with_detail("error", text)
}

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| rejected(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Write payload: the JSON body, or the query string when no body is sent
///
/// A request with a `Content-Type` header is always parsed as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(header::CONTENT_TYPE) {
            let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }
        let (mut parts, _body) = req.into_parts();
        let QueryParams(value) = QueryParams::<T>::from_request_parts(&mut parts, state).await?;
        Ok(Self(value))
    }
}

/// Query string parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Numeric `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected(e.body_text()))?;
        Ok(Self(id))
    }
}
