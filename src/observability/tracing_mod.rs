//! Tracing and logging setup module.
//!
//! This module provides:
//! - Structured logging configuration
//! - OpenTelemetry distributed tracing
//! - Tracing span creation utilities

use anyhow::Result;
use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::Sampler;
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

/// Initialize structured logging with tracing and configuration
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("scalp_meter={}", config.log_level).parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("tower=warn".parse()?);

    // Pretty for development, JSON everywhere else
    if config.is_development()
        || std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()) == "pretty"
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .init();
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        tags = %config.formatted_tags(),
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Initialize OpenTelemetry distributed tracing with configuration
pub fn init_opentelemetry_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    // Only initialize if OTLP endpoint is configured
    if let Some(endpoint) = &config.otlp_endpoint {
        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.clone())
            .build()?;

        let sampler = if config.enable_trace_sampling {
            Sampler::TraceIdRatioBased(config.trace_sampling_ratio)
        } else {
            Sampler::AlwaysOn
        };

        let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
            .with_batch_exporter(otlp_exporter)
            .with_sampler(sampler)
            .build();

        global::set_tracer_provider(tracer_provider);

        tracing::info!(
            otlp_endpoint = %endpoint,
            trace_sampling_enabled = %config.enable_trace_sampling,
            trace_sampling_ratio = %config.trace_sampling_ratio,
            "OpenTelemetry tracing initialized with OTLP export"
        );
    } else {
        tracing::info!("OpenTelemetry tracing disabled (no OTLP endpoint configured)");
    }

    Ok(())
}

/// Create a span for scalp analysis operations
pub fn analysis_span(operation: &str) -> tracing::Span {
    tracing::info_span!("analysis_operation", operation = operation, component = "analysis")
}

/// Create a span for HTTP request handling
pub fn http_span(method: &str, path: &str) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = method,
        path = path,
        component = "http"
    )
}
