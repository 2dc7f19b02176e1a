//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`validation`] - 声明式字段校验
//! - [`logger`] - 日志初始化

pub mod logger;
pub mod validation;

// Re-export error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
