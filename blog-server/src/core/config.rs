use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::JwtConfig;
use crate::auth::jwt::generate_secure_printable_jwt_secret;
use crate::core::error::{Result, ServerError};

/// Minimum JWT secret length accepted in release mode
pub const MIN_SECRET_LEN: usize = 32;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件会先被加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | RUN_MODE | debug | 运行模式: debug / release |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite:blog.db | SQLite 数据库地址 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | PAGE_SIZE | 10 | 默认分页大小 |
/// | JWT_SECRET | (debug 自动生成) | HS256 密钥, release 下至少 32 字符 |
/// | JWT_EXPIRATION_MINUTES | 180 | 令牌有效期 |
/// | JWT_ISSUER | blog-server | 令牌签发者 |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | - | 启动时写入的登录账号 |
/// | RUNTIME_ROOT_PATH | runtime | 运行时文件根目录 |
/// | IMAGE_SAVE_PATH | upload/images | 图片保存目录 (相对根目录, 也是 URL 路径) |
/// | IMAGE_PREFIX_URL | http://127.0.0.1:8000 | 图片访问地址前缀 |
/// | IMAGE_MAX_SIZE_MB | 5 | 图片大小上限 |
/// | IMAGE_ALLOW_EXTS | .jpg,.jpeg,.png | 允许的扩展名 |
/// | CLEAN_INTERVAL_SECS | 0 | 定时清理间隔 (0 = 关闭) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志 |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动写文件) |
/// | SHUTDOWN_TIMEOUT_MS | 5000 | 优雅关闭超时 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_URL=sqlite:/data/blog.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行模式: debug | release
    pub run_mode: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// 请求未指定 page_size 时使用
    pub page_size: i64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 启动时写入的账号 (两者都设置才生效)
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// 图片上传配置
    pub image: ImageConfig,
    /// 定时清理间隔 (秒), 0 表示关闭
    pub clean_interval_secs: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

/// 图片上传配置
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub runtime_root: PathBuf,
    /// 相对 `runtime_root`, 同时作为访问 URL 的路径部分
    pub save_path: String,
    pub prefix_url: String,
    pub max_size_mb: u64,
    /// 小写, 带点: `.jpg`
    pub allow_exts: Vec<String>,
}

impl ImageConfig {
    /// 图片实际写入的目录
    pub fn save_dir(&self) -> PathBuf {
        self.runtime_root.join(&self.save_path)
    }

    /// `upload/images/<name>`
    pub fn save_url(&self, name: &str) -> String {
        format!("{}/{}", self.save_path, name)
    }

    /// `<prefix>/upload/images/<name>`
    pub fn full_url(&self, name: &str) -> String {
        format!("{}/{}", self.prefix_url, self.save_url(name))
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_exts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
        .collect()
}

impl Config {
    /// 内置默认值 (不读取环境变量)
    ///
    /// 常用于测试场景
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            run_mode: "debug".into(),
            http_port: 8000,
            database_url: "sqlite:blog.db".into(),
            db_max_connections: 5,
            page_size: 10,
            jwt: JwtConfig {
                secret: secret.into(),
                expiration_minutes: 180,
                issuer: "blog-server".into(),
            },
            admin_username: None,
            admin_password: None,
            image: ImageConfig {
                runtime_root: PathBuf::from("runtime"),
                save_path: "upload/images".into(),
                prefix_url: "http://127.0.0.1:8000".into(),
                max_size_mb: 5,
                allow_exts: parse_exts(".jpg,.jpeg,.png"),
            },
            clean_interval_secs: 0,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            shutdown_timeout_ms: 5000,
        }
    }

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。release 模式下 `JWT_SECRET`
    /// 必须设置且不少于 32 字符。
    pub fn from_env() -> Result<Self> {
        let mut config = Self::with_secret(String::new());

        if let Some(mode) = env_string("RUN_MODE") {
            config.run_mode = mode.trim().to_ascii_lowercase();
        }
        if let Some(port) = env_parse("HTTP_PORT") {
            config.http_port = port;
        }
        if let Some(url) = env_string("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(n) = env_parse("DB_MAX_CONNECTIONS") {
            config.db_max_connections = n;
        }
        if let Some(n) = env_parse("PAGE_SIZE") {
            config.page_size = n;
        }

        config.jwt.secret = Self::load_jwt_secret(config.is_release())?;
        if let Some(minutes) = env_parse("JWT_EXPIRATION_MINUTES") {
            config.jwt.expiration_minutes = minutes;
        }
        if let Some(issuer) = env_string("JWT_ISSUER") {
            config.jwt.issuer = issuer;
        }
        config.admin_username = env_string("ADMIN_USERNAME");
        config.admin_password = env_string("ADMIN_PASSWORD");

        if let Some(root) = env_string("RUNTIME_ROOT_PATH") {
            config.image.runtime_root = PathBuf::from(root);
        }
        if let Some(path) = env_string("IMAGE_SAVE_PATH") {
            config.image.save_path = path.trim_matches('/').to_string();
        }
        if let Some(prefix) = env_string("IMAGE_PREFIX_URL") {
            config.image.prefix_url = prefix.trim_end_matches('/').to_string();
        }
        if let Some(mb) = env_parse("IMAGE_MAX_SIZE_MB") {
            config.image.max_size_mb = mb;
        }
        if let Some(exts) = env_string("IMAGE_ALLOW_EXTS") {
            config.image.allow_exts = parse_exts(&exts);
        }

        if let Some(secs) = env_parse("CLEAN_INTERVAL_SECS") {
            config.clean_interval_secs = secs;
        }
        if let Some(level) = env_string("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(json) = env_parse("LOG_JSON") {
            config.log_json = json;
        }
        config.log_dir = env_string("LOG_DIR");
        if let Some(ms) = env_parse("SHUTDOWN_TIMEOUT_MS") {
            config.shutdown_timeout_ms = ms;
        }

        Ok(config)
    }

    /// 从环境变量安全地加载 JWT 密钥
    fn load_jwt_secret(release: bool) -> Result<String> {
        match env_string("JWT_SECRET") {
            Some(secret) if release && secret.len() < MIN_SECRET_LEN => Err(ServerError::Config(
                format!("JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"),
            )),
            Some(secret) => Ok(secret),
            None if release => Err(ServerError::Config(
                "JWT_SECRET environment variable must be set in release mode".into(),
            )),
            None => {
                tracing::warn!("JWT_SECRET not set, generating a temporary key for development");
                generate_secure_printable_jwt_secret().ok_or_else(|| {
                    ServerError::Config("Failed to generate a temporary JWT secret".into())
                })
            }
        }
    }

    /// 是否 release 模式
    pub fn is_release(&self) -> bool {
        self.run_mode == "release"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exts_normalizes() {
        assert_eq!(
            parse_exts(" JPG, .png ,,webp"),
            vec![".jpg".to_string(), ".png".to_string(), ".webp".to_string()]
        );
    }

    #[test]
    fn test_builtin_defaults() {
        let config = Config::with_secret("secret");
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.jwt.expiration_minutes, 180);
        assert_eq!(config.image.max_size_bytes(), 5 * 1024 * 1024);
        assert_eq!(config.image.allow_exts, vec![".jpg", ".jpeg", ".png"]);
        assert!(!config.is_release());
    }

    #[test]
    fn test_image_urls() {
        let config = Config::with_secret("secret");
        assert_eq!(config.image.save_dir(), PathBuf::from("runtime/upload/images"));
        assert_eq!(config.image.save_url("a.png"), "upload/images/a.png");
        assert_eq!(
            config.image.full_url("a.png"),
            "http://127.0.0.1:8000/upload/images/a.png"
        );
    }
}
