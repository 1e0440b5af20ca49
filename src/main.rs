use anyhow::Result;
use scalp_meter::config::AppConfig;
use scalp_meter::observability;
use scalp_meter::server;
use tracing::{info, warn};

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Keep serving rather than shutting down immediately
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Load and validate configuration before anything binds a port
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    config.validate().map_err(|e| {
        anyhow::anyhow!("Configuration validation failed: {}. Please check your environment.", e)
    })?;

    // Initialize complete observability stack (metrics, tracing, logging, health checks)
    observability::init_observability_with_config(
        config.observability.clone(),
        config.server.static_dir.clone(),
    )
    .await?;

    let _health_metrics_handle =
        observability::start_health_metrics_recorder(config.server.static_dir.clone());

    info!("{}", config.summary());

    server::run_server(&config, shutdown_signal()).await
}
