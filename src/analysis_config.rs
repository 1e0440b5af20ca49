//! # Analysis Configuration Module
//!
//! This module defines configuration structures for scalp analysis,
//! including the crop window, mask refinement parameters, and upload limits.

use crate::errors::{AppError, AppResult};

// Constants for analysis configuration
pub const DEFAULT_CROP_LEFT: f64 = 0.25;
pub const DEFAULT_CROP_TOP: f64 = 0.25;
pub const DEFAULT_CROP_RIGHT: f64 = 0.75;
pub const DEFAULT_CROP_BOTTOM: f64 = 0.75;
pub const DEFAULT_KERNEL_SIZE: u32 = 5;
pub const DEFAULT_CLOSING_ITERATIONS: u32 = 3;
pub const MIN_FORMAT_BYTES: usize = 8;
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10MB limit for uploads
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 30;

/// Fractional crop window applied to the decoded image.
///
/// Each bound is a fraction of the matching image dimension; the default keeps
/// the central 50%x50% of the photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for CropRegion {
    fn default() -> Self {
        Self {
            left: DEFAULT_CROP_LEFT,
            top: DEFAULT_CROP_TOP,
            right: DEFAULT_CROP_RIGHT,
            bottom: DEFAULT_CROP_BOTTOM,
        }
    }
}

impl CropRegion {
    /// Validate that every fraction is within [0, 1] and ordered
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::Config(format!(
                    "crop {} fraction must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.left > self.right {
            return Err(AppError::Config(format!(
                "crop left ({}) must not exceed crop right ({})",
                self.left, self.right
            )));
        }
        if self.top > self.bottom {
            return Err(AppError::Config(format!(
                "crop top ({}) must not exceed crop bottom ({})",
                self.top, self.bottom
            )));
        }
        Ok(())
    }
}

/// Parameters of the morphological closing applied to the scalp mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphologyConfig {
    /// Side length of the square structuring element (odd)
    pub kernel_size: u32,
    /// Number of dilation passes followed by the same number of erosion passes
    pub iterations: u32,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            iterations: DEFAULT_CLOSING_ITERATIONS,
        }
    }
}

impl MorphologyConfig {
    /// Chebyshev radius of the structuring element (2 for a 5x5 square)
    pub fn radius(&self) -> u8 {
        (self.kernel_size / 2).min(u8::MAX as u32) as u8
    }

    /// Validate morphology parameters
    pub fn validate(&self) -> AppResult<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(AppError::Config(format!(
                "kernel_size must be a positive odd number, got {}",
                self.kernel_size
            )));
        }
        if self.kernel_size > 31 {
            return Err(AppError::Config(format!(
                "kernel_size cannot be greater than 31, got {}",
                self.kernel_size
            )));
        }
        if self.iterations == 0 {
            return Err(AppError::Config(
                "iterations must be greater than 0".to_string(),
            ));
        }
        if self.iterations > 10 {
            return Err(AppError::Config(format!(
                "iterations cannot be greater than 10, got {}",
                self.iterations
            )));
        }
        Ok(())
    }
}

/// Configuration structure for scalp analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Crop window applied before thresholding
    pub crop: CropRegion,
    /// Mask refinement parameters
    pub morphology: MorphologyConfig,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
    /// Minimum bytes required for format detection
    pub min_format_bytes: usize,
    /// Wall-clock limit for one analysis in seconds
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            crop: CropRegion::default(),
            morphology: MorphologyConfig::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            min_format_bytes: MIN_FORMAT_BYTES,
            timeout_secs: DEFAULT_ANALYSIS_TIMEOUT_SECS,
        }
    }
}

impl AnalysisConfig {
    /// Validate analysis configuration parameters
    pub fn validate(&self) -> AppResult<()> {
        self.crop.validate()?;
        self.morphology.validate()?;

        if self.max_upload_bytes == 0 {
            return Err(AppError::Config(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        if self.min_format_bytes == 0 {
            return Err(AppError::Config(
                "min_format_bytes must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs > 300 {
            return Err(AppError::Config(
                "timeout_secs cannot be greater than 300 seconds".to_string(),
            ));
        }
        Ok(())
    }
}
