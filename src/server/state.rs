use crate::analysis_config::AnalysisConfig;
use crate::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisConfig>,
    pub image_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            analysis: Arc::new(config.analysis.clone()),
            image_dir: Arc::new(config.server.image_dir()),
        }
    }
}
