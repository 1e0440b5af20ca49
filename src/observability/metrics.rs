//! Metrics collection and Prometheus export module.
//!
//! This module provides:
//! - Prometheus recorder setup
//! - The metrics/health HTTP server
//! - Metrics recording functions for analyses and requests

use anyhow::Result;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::observability_config::ObservabilityConfig;

/// Parameters for recording one analysis outcome
#[derive(Debug, Clone)]
pub struct AnalysisMetricsParams<'a> {
    pub success: bool,
    /// Error kind label when `success` is false
    pub failure_kind: Option<&'a str>,
    pub total_duration: Duration,
    pub image_size: u64,
    pub score: Option<u8>,
}

/// Initialize metrics collection with Prometheus exporter and configuration
pub fn init_metrics_with_config(config: &ObservabilityConfig) -> Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();
    let handle = builder.install_recorder()?;

    tracing::info!(
        metrics_enabled = %config.enable_metrics_export,
        "Metrics collection initialized"
    );
    Ok(handle)
}

/// Serve `/metrics`, `/health/live`, and `/health/ready` on the given port
pub async fn start_metrics_server(
    metrics_handle: PrometheusHandle,
    port: u16,
    static_dir: PathBuf,
) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting metrics server with health checks on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on {}", addr);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let metrics_handle = metrics_handle.clone();
                    let static_dir = static_dir.clone();

                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);

                        let service = hyper::service::service_fn(
                            move |req: hyper::Request<hyper::body::Incoming>| {
                                let metrics_handle = metrics_handle.clone();
                                let static_dir = static_dir.clone();
                                async move {
                                    match (req.method(), req.uri().path()) {
                                        (&hyper::Method::GET, "/metrics") => {
                                            let metrics = metrics_handle.render();
                                            let mut response = hyper::Response::new(metrics);
                                            response.headers_mut().insert(
                                                "content-type",
                                                hyper::header::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
                                            );
                                            Ok::<_, std::convert::Infallible>(response)
                                        }
                                        (&hyper::Method::GET, "/health/live") => {
                                            Ok(hyper::Response::new("OK".to_string()))
                                        }
                                        (&hyper::Method::GET, "/health/ready") => {
                                            match super::health_checks::perform_readiness_checks(&static_dir).await {
                                                Ok(_) => Ok(hyper::Response::new("OK".to_string())),
                                                Err(e) => {
                                                    let mut response = hyper::Response::new(
                                                        format!("NOT READY: {}", e),
                                                    );
                                                    *response.status_mut() =
                                                        hyper::StatusCode::SERVICE_UNAVAILABLE;
                                                    Ok(response)
                                                }
                                            }
                                        }
                                        _ => {
                                            let mut response =
                                                hyper::Response::new("Not Found".to_string());
                                            *response.status_mut() = hyper::StatusCode::NOT_FOUND;
                                            Ok(response)
                                        }
                                    }
                                }
                            },
                        );

                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await
                        {
                            crate::errors::error_logging::log_network_error(
                                &err,
                                "serve_metrics_connection",
                                None,
                            );
                        }
                    });
                }
                Err(e) => {
                    crate::errors::error_logging::log_network_error(
                        &e,
                        "accept_metrics_connection",
                        Some(&addr.to_string()),
                    );
                }
            }
        }
    });

    Ok(())
}

/// Record scalp analysis metrics
pub fn record_analysis_metrics(params: AnalysisMetricsParams<'_>) {
    let result = if params.success {
        "success".to_string()
    } else {
        params.failure_kind.unwrap_or("failure").to_string()
    };
    metrics::counter!("analysis_operations_total", "result" => result).increment(1);
    metrics::histogram!("analysis_duration_seconds").record(params.total_duration.as_secs_f64());
    metrics::histogram!("analysis_image_size_bytes").record(params.image_size as f64);
    if let Some(score) = params.score {
        metrics::histogram!("analysis_score").record(score as f64);
    }
}

/// Record which tier a response landed in
pub fn record_tier_result(level: u8) {
    let tier = level.to_string();
    metrics::counter!("tier_results_total", "tier" => tier).increment(1);
}

/// Record request metrics
pub fn record_request_metrics(method: &str, status: u16, duration: Duration) {
    let method = method.to_string();
    let status = status.to_string();
    metrics::counter!("requests_total", "method" => method, "status" => status).increment(1);
    metrics::histogram!("request_duration_seconds").record(duration.as_secs_f64());
}
