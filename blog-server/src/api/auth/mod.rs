//! Auth API 模块 (公开路由)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/auth", get(handler::token))
}
