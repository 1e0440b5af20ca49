//! Observability module for centralized metrics, tracing, and logging setup.
//!
//! This module provides:
//! - Metrics collection and Prometheus export
//! - Distributed tracing with OpenTelemetry
//! - Structured logging with configurable levels
//! - Health check endpoints for monitoring
//! - Environment-specific configuration support

pub mod health_checks;
pub mod metrics;
pub mod tracing_mod;

use anyhow::Result;
use std::path::PathBuf;

use crate::observability_config::ObservabilityConfig;

pub use self::health_checks::{perform_readiness_checks, start_health_metrics_recorder};
pub use self::metrics::{
    record_analysis_metrics, record_request_metrics, record_tier_result, AnalysisMetricsParams,
};
pub use self::tracing_mod::{analysis_span, http_span};

/// Initialize the complete observability stack with custom configuration
pub async fn init_observability_with_config(
    config: ObservabilityConfig,
    static_dir: PathBuf,
) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    // Initialize tracing first
    tracing_mod::init_tracing_with_config(&config)?;

    tracing_mod::init_opentelemetry_tracing_with_config(&config)?;

    if config.enable_metrics_export {
        let metrics_handle = metrics::init_metrics_with_config(&config)?;
        metrics::start_metrics_server(metrics_handle, config.metrics_port, static_dir).await?;
    } else {
        tracing::info!("Metrics export disabled, skipping metrics server");
    }

    tracing::info!(
        environment = %config.environment,
        otlp_endpoint = ?config.otlp_endpoint,
        metrics_port = %config.metrics_port,
        "Observability stack initialized successfully"
    );
    Ok(())
}
