//! # Observability Configuration
//!
//! Environment-specific configuration for logging, metrics, and trace export.

use std::env;

/// Observability configuration for different environments
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// OTLP endpoint for trace export
    pub otlp_endpoint: Option<String>,
    /// Prometheus metrics endpoint port
    pub metrics_port: u16,
    /// Log level for the service
    pub log_level: String,
    /// Whether to enable trace sampling
    pub enable_trace_sampling: bool,
    /// Trace sampling ratio (0.0-1.0)
    pub trace_sampling_ratio: f64,
    /// Whether to serve the Prometheus metrics endpoint
    pub enable_metrics_export: bool,
    /// Additional tags attached to the startup log
    pub tags: Vec<(String, String)>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            otlp_endpoint: None,
            metrics_port: 9090,
            log_level: "info".to_string(),
            enable_trace_sampling: false,
            trace_sampling_ratio: 1.0,
            enable_metrics_export: true,
            tags: Vec::new(),
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables.
    ///
    /// `ENVIRONMENT` selects a preset; individual variables override it.
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let base = presets::for_environment(&environment);

        let mut config = Self {
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            metrics_port: env::var("METRICS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.metrics_port),
            log_level: env::var("OBSERVABILITY_LOG_LEVEL").unwrap_or_else(|_| base.log_level.clone()),
            enable_trace_sampling: env::var("ENABLE_TRACE_SAMPLING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.enable_trace_sampling),
            trace_sampling_ratio: env::var("TRACE_SAMPLING_RATIO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.trace_sampling_ratio),
            enable_metrics_export: env::var("ENABLE_METRICS_EXPORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.enable_metrics_export),
            tags: env::var("OBSERVABILITY_TAGS")
                .map(|raw| parse_tags(&raw))
                .unwrap_or_default(),
            environment,
        };
        config.add_default_tags();
        config
    }

    /// Add default tags based on environment and configuration
    fn add_default_tags(&mut self) {
        self.tags.push(("environment".to_string(), self.environment.clone()));
        self.tags.push(("service".to_string(), "scalp-meter".to_string()));

        if let Ok(version) = env::var("SERVICE_VERSION") {
            self.tags.push(("version".to_string(), version));
        }

        if let Ok(hostname) = env::var("HOSTNAME") {
            self.tags.push(("hostname".to_string(), hostname));
        }
    }

    /// Check if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Tags formatted as `key=value` pairs
    pub fn formatted_tags(&self) -> String {
        self.tags
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.otlp_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("Invalid OTLP endpoint format: {}", endpoint));
            }
        }

        if !(0.0..=1.0).contains(&self.trace_sampling_ratio) {
            return Err(format!("Invalid trace sampling ratio: {}", self.trace_sampling_ratio));
        }

        if self.metrics_port == 0 {
            return Err(format!("Invalid metrics port: {}", self.metrics_port));
        }

        Ok(())
    }
}

/// Parse tags from environment variable string
/// Format: "key1=value1,key2=value2,key3=value3"
fn parse_tags(tags_str: &str) -> Vec<(String, String)> {
    tags_str
        .split(',')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if !key.trim().is_empty() => {
                    Some((key.trim().to_string(), value.trim().to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

/// Environment-specific configuration presets
pub mod presets {
    use super::ObservabilityConfig;

    /// Development configuration with full observability
    pub fn development() -> ObservabilityConfig {
        ObservabilityConfig {
            environment: "development".to_string(),
            enable_trace_sampling: false,
            trace_sampling_ratio: 1.0,
            enable_metrics_export: true,
            log_level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Staging configuration with moderate observability
    pub fn staging() -> ObservabilityConfig {
        ObservabilityConfig {
            environment: "staging".to_string(),
            enable_trace_sampling: true,
            trace_sampling_ratio: 0.5,
            enable_metrics_export: true,
            log_level: "info".to_string(),
            ..Default::default()
        }
    }

    /// Production configuration with optimized observability
    pub fn production() -> ObservabilityConfig {
        ObservabilityConfig {
            environment: "production".to_string(),
            enable_trace_sampling: true,
            trace_sampling_ratio: 0.1,
            enable_metrics_export: true,
            log_level: "info".to_string(),
            ..Default::default()
        }
    }

    /// Preset for a named environment; unknown names get the defaults
    pub fn for_environment(environment: &str) -> ObservabilityConfig {
        match environment {
            "development" => development(),
            "staging" => staging(),
            "production" => production(),
            other => ObservabilityConfig {
                environment: other.to_string(),
                ..Default::default()
            },
        }
    }
}
