//! # Unified Application Configuration
//!
//! This module provides a centralized configuration system that consolidates
//! all application settings into a single, structured configuration object.
//! It supports loading from environment variables, validation, and provides
//! a clean interface for accessing configuration throughout the application.

use crate::analysis_config::{AnalysisConfig, CropRegion, MorphologyConfig};
use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface the upload server binds to
    pub host: String,
    /// Upload server port
    pub port: u16,
    /// Metrics server port
    pub metrics_port: u16,
    /// Whether to allow privileged ports (< 1024)
    pub allow_privileged_ports: bool,
    /// Directory holding `img/` with the tier images
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            metrics_port: 9090,
            allow_privileged_ports: false,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::Config("Server host cannot be empty".to_string()));
        }

        if !self.allow_privileged_ports {
            if self.port < 1024 {
                return Err(AppError::Config(format!(
                    "Server port {} is privileged. Set allow_privileged_ports=true or use port >= 1024",
                    self.port
                )));
            }
            if self.metrics_port < 1024 {
                return Err(AppError::Config(format!(
                    "Metrics port {} is privileged. Set allow_privileged_ports=true or use port >= 1024",
                    self.metrics_port
                )));
            }
        }

        if self.port == self.metrics_port {
            return Err(AppError::Config(
                "Server port and metrics port cannot be the same".to_string(),
            ));
        }

        if self.static_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Static directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address string for the upload server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory the tier images are served from
    pub fn image_dir(&self) -> PathBuf {
        self.static_dir.join("img")
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Scalp analysis configuration
    pub analysis: AnalysisConfig,
    /// Observability configuration
    pub observability: ObservabilityConfig,
}

/// Read `name` from the environment, falling back to `default` when unset
fn env_or<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid value (got '{}')", name, raw))),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        // Load server configuration
        config.server.host = env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
        config.server.port = env_or("PORT", config.server.port)?;
        config.server.metrics_port = env_or("METRICS_PORT", config.server.metrics_port)?;
        config.server.allow_privileged_ports = env::var("ALLOW_PRIVILEGED_PORTS")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";
        if let Ok(dir) = env::var("STATIC_DIR") {
            config.server.static_dir = PathBuf::from(dir);
        }

        // Load analysis configuration
        let defaults = AnalysisConfig::default();
        config.analysis = AnalysisConfig {
            crop: CropRegion {
                left: env_or("CROP_LEFT", defaults.crop.left)?,
                top: env_or("CROP_TOP", defaults.crop.top)?,
                right: env_or("CROP_RIGHT", defaults.crop.right)?,
                bottom: env_or("CROP_BOTTOM", defaults.crop.bottom)?,
            },
            morphology: MorphologyConfig {
                kernel_size: env_or("MORPH_KERNEL_SIZE", defaults.morphology.kernel_size)?,
                iterations: env_or("MORPH_ITERATIONS", defaults.morphology.iterations)?,
            },
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            min_format_bytes: defaults.min_format_bytes,
            timeout_secs: env_or("ANALYSIS_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        // Load observability configuration; the metrics port is shared with the server section
        config.observability = ObservabilityConfig::from_env();
        config.observability.metrics_port = config.server.metrics_port;

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate()?;
        self.analysis.validate()?;
        self.observability
            .validate()
            .map_err(AppError::Config)?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: bind={}, metrics_port={}, static_dir={}, max_upload_bytes={}, analysis_timeout_secs={}, environment={}, observability_enabled={}",
            self.server.bind_address(),
            self.server.metrics_port,
            self.server.static_dir.display(),
            self.analysis.max_upload_bytes,
            self.analysis.timeout_secs,
            self.observability.environment,
            self.observability.enable_metrics_export
        )
    }
}
