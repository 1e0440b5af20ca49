//! Health check functionality module.
//!
//! This module provides:
//! - Lookup table integrity checks
//! - Static asset directory checks
//! - Comprehensive readiness checks

use anyhow::Result;
use std::path::Path;

use crate::color_ranges::validate_color_table;
use crate::tiers::{validate_tier_table, RESULT_TIERS};

/// Perform comprehensive readiness checks
pub async fn perform_readiness_checks(static_dir: &Path) -> Result<()> {
    check_lookup_tables_health()?;
    check_static_assets_health(static_dir).await?;
    Ok(())
}

/// Check that the color and tier tables are usable
pub fn check_lookup_tables_health() -> Result<()> {
    validate_color_table().map_err(|e| anyhow::anyhow!("Color table health check failed: {}", e))?;
    validate_tier_table().map_err(|e| anyhow::anyhow!("Tier table health check failed: {}", e))?;

    tracing::debug!("Lookup table health check passed");
    Ok(())
}

/// Check that the tier image directory exists.
///
/// Missing individual images are logged but do not fail readiness; the JSON
/// result is still complete without them.
pub async fn check_static_assets_health(static_dir: &Path) -> Result<()> {
    let image_dir = static_dir.join("img");
    let metadata = tokio::fs::metadata(&image_dir).await.map_err(|e| {
        anyhow::anyhow!(
            "Static asset health check failed: {} ({})",
            image_dir.display(),
            e
        )
    })?;

    if !metadata.is_dir() {
        return Err(anyhow::anyhow!(
            "Static asset health check failed: {} is not a directory",
            image_dir.display()
        ));
    }

    for tier in RESULT_TIERS.iter() {
        if tokio::fs::metadata(image_dir.join(tier.image)).await.is_err() {
            tracing::warn!(image = %tier.image, "Tier image missing from static directory");
        }
    }

    tracing::debug!("Static asset health check passed");
    Ok(())
}

/// Start a background task to periodically record health check metrics
pub fn start_health_metrics_recorder(
    static_dir: std::path::PathBuf,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));

        loop {
            interval.tick().await;

            let healthy = perform_readiness_checks(&static_dir).await.is_ok();
            metrics::gauge!("service_ready").set(if healthy { 1.0 } else { 0.0 });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_tables_are_healthy() {
        assert!(check_lookup_tables_health().is_ok());
    }

    #[tokio::test]
    async fn test_static_assets_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_static_assets_health(dir.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_static_assets_present_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();

        assert!(check_static_assets_health(dir.path()).await.is_ok());
        assert!(perform_readiness_checks(dir.path()).await.is_ok());
    }
}
