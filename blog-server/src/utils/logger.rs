//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use tracing_subscriber::EnvFilter;

pub type LoggerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Initialize the logger
pub fn init_logger() -> LoggerResult {
    init_logger_with_file(None, false, None)
}

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` overrides `log_level` when set. Files roll daily and are only
/// written when `log_dir` already exists.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> LoggerResult {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|path| path.exists())
        .map(|path| tracing_appender::rolling::daily(path, "blog-server"));

    match (json, file_appender) {
        (true, Some(writer)) => subscriber.json().with_writer(writer).try_init(),
        (true, None) => subscriber.json().try_init(),
        (false, Some(writer)) => subscriber.with_ansi(false).with_writer(writer).try_init(),
        (false, None) => subscriber.try_init(),
    }
}
