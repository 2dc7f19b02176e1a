//! 后台任务管理
//!
//! 注册后台任务并在关闭时统一取消。

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;

/// 已注册的后台任务
struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// 后台任务管理器
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// let token = tasks.shutdown_token();
/// tasks.spawn("cleanup", async move { token.cancelled().await });
/// tasks.shutdown(Duration::from_secs(5)).await;
/// ```
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 获取取消令牌（用于任务内部监听 shutdown 信号）
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 注册并启动一个后台任务
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        tracing::debug!(task = %name, "Registered background task");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 取消所有任务并等待其退出, 超时后中止
    pub async fn shutdown(self, timeout: Duration) {
        self.shutdown.cancel();
        for task in self.tasks {
            let abort = task.handle.abort_handle();
            match tokio::time::timeout(timeout, task.handle).await {
                Ok(Ok(())) => tracing::debug!(task = %task.name, "Background task stopped"),
                Ok(Err(e)) => tracing::error!(task = %task.name, error = %e, "Background task failed"),
                Err(_) => {
                    tracing::warn!(task = %task.name, "Background task did not stop in time, aborting");
                    abort.abort();
                }
            }
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

/// 定时清理任务
///
/// 每 `interval` 执行一次标签与文章的 purge。文章 purge 会物理删除
/// 所有未删除的文章, 默认关闭 (`CLEAN_INTERVAL_SECS=0`)。
pub async fn run_cleanup(state: ServerState, interval: Duration, shutdown: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                tracing::info!("Running scheduled cleanup");
                if let Err(e) = state.tags.purge().await {
                    tracing::error!(code = e.code.code(), error = %e, "Scheduled tag cleanup failed");
                }
                if let Err(e) = state.articles.purge().await {
                    tracing::error!(code = e.code.code(), error = %e, "Scheduled article cleanup failed");
                }
            }
        }
    }
}
