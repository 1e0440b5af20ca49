//! # Image Preprocessing Module
//!
//! This module turns an uploaded photo into a refined binary scalp mask.
//!
//! The module is organized into focused sub-modules:
//! - `cropping`: Decoding and central-region cropping
//! - `thresholding`: Color-range binarization
//! - `filtering`: Morphological mask refinement
//! - `types`: Shared types and error definitions

pub mod cropping;
pub mod filtering;
pub mod thresholding;
pub mod types;

// Re-export commonly used types and functions for convenience
pub use types::{
    CropBox, CroppedImageResult, MorphologicalImageResult, MorphologicalOperation,
    PreprocessingError, ScalpMaskResult,
};

// Re-export main functions from sub-modules
pub use cropping::{calculate_crop_box, crop_center, decode_rgb, load_and_crop_center};
pub use filtering::{apply_morphological_operation, refine_scalp_mask};
pub use thresholding::build_scalp_mask;
