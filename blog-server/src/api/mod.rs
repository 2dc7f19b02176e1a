//! HTTP API
//!
//! | 路由 | 认证 |
//! |------|------|
//! | `GET /auth` | 公开 |
//! | `/api/v1/tags`, `/api/v1/tag/{id}` | 需要令牌 |
//! | `/api/v1/articles`, `/api/v1/article`, `/api/v1/article/{id}` | 需要令牌 |
//! | `POST /api/v1/upload` | 需要令牌 |

pub mod articles;
pub mod auth;
pub mod extract;
pub mod tags;
pub mod upload;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// API prefix for token-gated routes
pub const API_PREFIX: &str = "/api/v1";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no tower middleware, no state)
///
/// Everything under [`API_PREFIX`] passes through [`require_auth`](crate::auth::require_auth).
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .merge(tags::router())
        .merge(articles::router())
        .merge(upload::router(state.config.image.max_size_bytes()))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ));

    Router::new()
        // Auth API - public route
        .merge(auth::router())
        .nest(API_PREFIX, protected)
}

/// Build a fully configured application with all middleware and state
///
/// This is used by both the HTTP server and the integration tests
pub fn build_app(state: ServerState) -> Router {
    build_router(&state)
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}
