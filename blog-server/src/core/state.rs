//! 服务器状态
//!
//! 所有处理器共享的状态, clone 成本低 (连接池与 Arc)。

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::auth::password::hash_password;
use crate::core::error::{Result, ServerError};
use crate::core::tasks::{BackgroundTasks, run_cleanup};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{ArticleStore, TagStore, auth};
use crate::services::{ArticleService, AuthService, TagService};

/// 服务器状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 |
/// | pool | SQLite 连接池 |
/// | jwt_service | JWT 令牌服务 |
/// | tags / articles | 资源服务 |
/// | auth | 登录换取令牌 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub tags: TagService,
    pub articles: ArticleService,
    pub auth: AuthService,
}

impl ServerState {
    /// 由配置与连接池组装状态
    pub fn from_parts(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let page_size = config.page_size;

        Self {
            tags: TagService::new(TagStore::new(pool.clone()), page_size),
            articles: ArticleService::new(ArticleStore::new(pool.clone()), page_size),
            auth: AuthService::new(pool.clone(), jwt_service.clone()),
            config: Arc::new(config),
            pool,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (连接池 + 迁移)
    /// 2. 各服务
    /// 3. 写入配置中的登录账号
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        let state = Self::from_parts(config.clone(), db.pool);
        state.seed_admin().await?;
        Ok(state)
    }

    /// 使用内存数据库初始化 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        let state = Self::from_parts(config, db.pool);
        state.seed_admin().await?;
        Ok(state)
    }

    /// 写入 `ADMIN_USERNAME` / `ADMIN_PASSWORD` 账号 (已存在则更新密码)
    async fn seed_admin(&self) -> Result<()> {
        let (Some(username), Some(password)) =
            (&self.config.admin_username, &self.config.admin_password)
        else {
            tracing::info!("No admin account configured, token endpoint uses existing accounts");
            return Ok(());
        };

        let hash = hash_password(password)
            .map_err(|e| ServerError::Config(format!("Failed to hash admin password: {e}")))?;
        auth::upsert(&self.pool, username, &hash)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        tracing::info!(username = %username, "Admin account ready");
        Ok(())
    }

    /// 启动后台任务
    ///
    /// 目前只有定时清理 (`CLEAN_INTERVAL_SECS > 0` 时启用)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();
        if self.config.clean_interval_secs > 0 {
            let interval = Duration::from_secs(self.config.clean_interval_secs);
            let token = tasks.shutdown_token();
            tasks.spawn("scheduled_cleanup", run_cleanup(self.clone(), interval, token));
            tracing::info!(interval_secs = self.config.clean_interval_secs, "Scheduled cleanup enabled");
        }
        tasks
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
