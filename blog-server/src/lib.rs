//! Blog Server - 博客文章与标签的 HTTP 后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx) 表适配器, 软删除
//! - **服务** (`services`): 校验 → 存在性检查 → 单次写入
//! - **认证** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): `{code, msg, data}` 统一响应
//!
//! # 模块结构
//!
//! ```text
//! blog-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── auth/          # JWT 认证、中间件、密码哈希
//! ├── services/      # 通用资源服务、标签、文章、登录
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 校验、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-exports
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 `.env` 并初始化日志
///
/// 日志参数直接读取 `LOG_LEVEL` / `LOG_JSON` / `LOG_DIR`, 以便配置加载
/// 过程中的告警也能输出。
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let dir = std::env::var("LOG_DIR").ok();

    init_logger_with_file(level.as_deref(), json, dir.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {e}"))
}
