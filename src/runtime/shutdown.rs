use sea_orm::DatabaseConnection;
use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C，然后关闭数据库连接池
pub async fn listen_for_shutdown(db: &DatabaseConnection) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, closing connections...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    if let Err(e) = db.clone().close().await {
        warn!("Failed to close database connection: {}", e);
    } else {
        info!("Database connection closed");
    }
}
