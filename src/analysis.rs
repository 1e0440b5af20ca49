//! # Scalp Analysis Module
//!
//! Runs the full visibility pipeline on an uploaded photo:
//!
//! 1. **Validation**: reject empty, oversized, or truncated payloads
//! 2. **Decode and crop**: keep the central region of the photo
//! 3. **Threshold**: mark pixels inside the category's scalp color range
//! 4. **Refine**: morphological closing of the mask
//! 5. **Score**: percentage of mask pixels marked as scalp
//!
//! The pipeline is synchronous and CPU-bound. [`analyze_with_timeout`] runs it
//! on the blocking pool under a wall-clock limit for the serving layer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::analysis_config::AnalysisConfig;
use crate::analysis_errors::AnalysisError;
use crate::color_ranges::category_to_range;
use crate::errors::error_logging;
use crate::observability;
use crate::preprocessing::{build_scalp_mask, load_and_crop_center, refine_scalp_mask};
use crate::scoring::{count_scalp_pixels, score_mask, Score};

/// Everything measured during one successful analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub score: Score,
    /// Decoded photo size (width, height)
    pub original_dimensions: (u32, u32),
    /// Size of the cropped region that was scored
    pub cropped_dimensions: (u32, u32),
    /// Scalp pixels in the refined mask
    pub scalp_pixels: u64,
    pub processing_time_ms: u64,
}

/// Check an upload before any decoding work is done
pub fn validate_upload(bytes: &[u8], config: &AnalysisConfig) -> Result<(), AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::Validation(
            "Uploaded image is empty".to_string(),
        ));
    }

    if bytes.len() > config.max_upload_bytes {
        return Err(AnalysisError::Validation(format!(
            "Uploaded image is too large: {} bytes (max {} bytes)",
            bytes.len(),
            config.max_upload_bytes
        )));
    }

    if bytes.len() < config.min_format_bytes {
        return Err(AnalysisError::Decode(format!(
            "Image data too short for format detection: {} bytes",
            bytes.len()
        )));
    }

    Ok(())
}

/// Score an uploaded photo with the default configuration.
///
/// Unknown `hair_color_category` values fall back to the `black` range.
///
/// # Examples
///
/// ```rust,no_run
/// let bytes = std::fs::read("photo.jpg").unwrap();
/// let score = scalp_meter::analysis::analyze(&bytes, "dark_brown").unwrap();
/// assert!(score.value() <= 100);
/// ```
pub fn analyze(image_bytes: &[u8], hair_color_category: &str) -> Result<Score, AnalysisError> {
    analyze_with_config(image_bytes, hair_color_category, &AnalysisConfig::default())
        .map(|outcome| outcome.score)
}

/// Score an uploaded photo, recording metrics and logging failures
pub fn analyze_with_config(
    image_bytes: &[u8],
    hair_color_category: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisOutcome, AnalysisError> {
    let start_time = Instant::now();
    let result = analyze_unrecorded(image_bytes, hair_color_category, config);
    report_outcome(
        &result,
        hair_color_category,
        image_bytes.len() as u64,
        start_time.elapsed(),
    );
    result
}

/// Pipeline run inside the analysis span, without metrics or outcome logs
fn analyze_unrecorded(
    image_bytes: &[u8],
    hair_color_category: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisOutcome, AnalysisError> {
    let span = observability::analysis_span("analyze");
    let _enter = span.enter();

    run_pipeline(image_bytes, hair_color_category, config, Instant::now())
}

/// Record metrics and log the result of exactly one analysis request
fn report_outcome(
    result: &Result<AnalysisOutcome, AnalysisError>,
    hair_color_category: &str,
    image_size: u64,
    total_duration: Duration,
) {
    match result {
        Ok(outcome) => {
            observability::record_analysis_metrics(observability::AnalysisMetricsParams {
                success: true,
                failure_kind: None,
                total_duration,
                image_size,
                score: Some(outcome.score.value()),
            });
            info!(
                score = %outcome.score,
                hair_color = %hair_color_category,
                cropped_width = outcome.cropped_dimensions.0,
                cropped_height = outcome.cropped_dimensions.1,
                duration_ms = outcome.processing_time_ms,
                "Scalp analysis completed"
            );
        }
        Err(err) => {
            observability::record_analysis_metrics(observability::AnalysisMetricsParams {
                success: false,
                failure_kind: Some(err.kind()),
                total_duration,
                image_size,
                score: None,
            });
            error_logging::log_analysis_error(
                err,
                "analyze",
                Some(hair_color_category),
                Some(image_size),
                Some(total_duration),
            );
        }
    }
}

fn run_pipeline(
    image_bytes: &[u8],
    hair_color_category: &str,
    config: &AnalysisConfig,
    start_time: Instant,
) -> Result<AnalysisOutcome, AnalysisError> {
    validate_upload(image_bytes, config)?;

    let range = category_to_range(hair_color_category);

    let cropped = load_and_crop_center(image_bytes, &config.crop)?;
    let mask = build_scalp_mask(&cropped.image, &range);
    let refined = refine_scalp_mask(&mask.mask, &config.morphology);

    debug!(
        crop_ms = cropped.processing_time_ms,
        threshold_ms = mask.processing_time_ms,
        closing_ms = refined.processing_time_ms,
        raw_scalp_pixels = mask.scalp_pixels,
        "Scalp mask built"
    );

    let score = score_mask(&refined.image)?;

    Ok(AnalysisOutcome {
        score,
        original_dimensions: cropped.original_dimensions,
        cropped_dimensions: cropped.image.dimensions(),
        scalp_pixels: count_scalp_pixels(&refined.image),
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    })
}

/// Run the analysis on the blocking pool, giving up after `config.timeout_secs`.
///
/// A timed-out task keeps running to completion in the background; its result
/// is discarded and never reaches metrics or logs.
pub async fn analyze_with_timeout(
    image_bytes: Vec<u8>,
    hair_color_category: String,
    config: Arc<AnalysisConfig>,
) -> Result<AnalysisOutcome, AnalysisError> {
    let timeout_secs = config.timeout_secs;
    let image_size = image_bytes.len() as u64;
    let start_time = Instant::now();

    let category = hair_color_category.clone();
    let task = tokio::task::spawn_blocking(move || {
        analyze_unrecorded(&image_bytes, &category, &config)
    });

    let result = match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(AnalysisError::Internal(join_error.to_string())),
        Err(_) => {
            warn!(
                "Scalp analysis timed out after {}ms (limit: {}s)",
                start_time.elapsed().as_millis(),
                timeout_secs
            );
            Err(AnalysisError::Timeout(format!(
                "analysis exceeded {} seconds",
                timeout_secs
            )))
        }
    };

    report_outcome(&result, &hair_color_category, image_size, start_time.elapsed());
    result
}
