//! Unified error system for the blog API
//!
//! This module provides:
//! - [`ErrorCode`]: the result-code registry, with its message lookup
//! - [`ErrorCategory`]: classification of codes by range
//! - [`AppError`]: error type carrying a code, a message and details
//! - [`ApiResponse`]: the `{code, msg, data}` envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::TagNotFound);
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 10003);
//! assert_eq!(response.msg, "tag not found");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode, UNKNOWN_MESSAGE, lookup};
pub use types::{ApiResponse, AppError, AppResult, envelope};
