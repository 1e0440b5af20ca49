//! # Analysis Metrics Tests
//!
//! Runs with a process-wide Prometheus recorder so that work finishing on
//! blocking-pool threads is observed too. Kept in its own test binary because
//! the global recorder can only be installed once.


#[cfg(test)]
mod tests {
    use super::test_helpers::{solid_png, SCALP_PIXEL};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use scalp_meter::analysis::analyze_with_timeout;
    use scalp_meter::analysis_config::AnalysisConfig;
    use scalp_meter::analysis_errors::AnalysisError;
    use scalp_meter::color_ranges::category_to_range;
    use scalp_meter::preprocessing::{build_scalp_mask, load_and_crop_center, refine_scalp_mask};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// A timed-out analysis is counted once, as a timeout, even after the
    /// abandoned work finishes in the background
    #[tokio::test]
    async fn test_timed_out_analysis_is_recorded_once() {
        let handle = PrometheusBuilder::new().install_recorder().unwrap();

        let photo = solid_png(1500, 1500, SCALP_PIXEL);
        let config = AnalysisConfig {
            timeout_secs: 0,
            ..Default::default()
        };

        let result =
            analyze_with_timeout(photo.clone(), "black".to_string(), Arc::new(config.clone()))
                .await;
        assert!(matches!(result, Err(AnalysisError::Timeout(_))));

        // Same stages without any recording, to learn how long the abandoned
        // task needs before it is done
        let started = Instant::now();
        let cropped = load_and_crop_center(&photo, &config.crop).unwrap();
        let mask = build_scalp_mask(&cropped.image, &category_to_range("black"));
        refine_scalp_mask(&mask.mask, &config.morphology);
        tokio::time::sleep(started.elapsed() * 2 + Duration::from_millis(500)).await;

        let rendered = handle.render();
        assert!(
            rendered.contains("analysis_operations_total{result=\"timeout\"} 1"),
            "{}",
            rendered
        );
        assert!(!rendered.contains("result=\"success\""), "{}", rendered);
        assert!(!rendered.contains("analysis_score"), "{}", rendered);
    }
}
