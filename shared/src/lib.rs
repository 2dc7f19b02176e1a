//! Shared types for the blog API
//!
//! Common types used by the server and its clients: result codes,
//! error types, the response envelope and entity models.

pub mod error;
pub mod models;
pub mod response;
pub mod serde_helpers;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::{PageData, PageWindow, Paging};
