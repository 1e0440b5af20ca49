//! # Shared Types for Image Preprocessing
//!
//! This module contains the shared types, structs, and enums used across
//! the preprocessing sub-modules.

use image::{GrayImage, RgbImage};

/// Errors that can occur during image preprocessing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PreprocessingError {
    /// Failed to load or decode image
    ImageLoad { message: String },
    /// Crop window collapsed to zero width or height
    EmptyRegion { width: u32, height: u32 },
}

impl std::fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreprocessingError::ImageLoad { message } => {
                write!(f, "Failed to load image: {}", message)
            }
            PreprocessingError::EmptyRegion { width, height } => {
                write!(f, "Crop region is empty: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for PreprocessingError {}

impl From<PreprocessingError> for crate::analysis_errors::AnalysisError {
    fn from(err: PreprocessingError) -> Self {
        match err {
            PreprocessingError::ImageLoad { message } => {
                crate::analysis_errors::AnalysisError::Decode(message)
            }
            PreprocessingError::EmptyRegion { width, height } => {
                crate::analysis_errors::AnalysisError::EmptyImage { width, height }
            }
        }
    }
}

/// Pixel rectangle with exclusive right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropBox {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Result of image cropping operation.
#[derive(Debug, Clone)]
pub struct CroppedImageResult {
    /// The cropped RGB image
    pub image: RgbImage,
    /// Original image dimensions (width, height)
    pub original_dimensions: (u32, u32),
    /// Cropped region coordinates relative to original image
    pub cropped_region: CropBox,
    /// Processing time in milliseconds
    pub processing_time_ms: u32,
}

/// Result of color-range thresholding.
#[derive(Debug, Clone)]
pub struct ScalpMaskResult {
    /// Binary mask, 255 where the pixel is scalp-colored and 0 elsewhere
    pub mask: GrayImage,
    /// Number of scalp-colored pixels before refinement
    pub scalp_pixels: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u32,
}

/// Result of morphological operations on binary images.
#[derive(Debug, Clone)]
pub struct MorphologicalImageResult {
    /// The morphologically processed mask
    pub image: GrayImage,
    /// Type of morphological operation applied
    pub operation: MorphologicalOperation,
    /// Kernel size used (e.g., 5 for 5x5 kernel)
    pub kernel_size: u32,
    /// Number of passes applied
    pub iterations: u32,
    /// Processing time in milliseconds
    pub processing_time_ms: u32,
}

/// Types of morphological operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphologicalOperation {
    /// Erosion operation (shrinks bright regions)
    Erosion,
    /// Dilation operation (expands bright regions)
    Dilation,
    /// Closing operation (dilation followed by erosion - fills gaps)
    Closing,
}
