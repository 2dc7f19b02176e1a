//! Tag API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/tags", get(handler::list).post(handler::create))
        .route("/tag/{id}", put(handler::update).delete(handler::delete))
}
