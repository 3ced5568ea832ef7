use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C；监听失败时立即进入关闭流程
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}
