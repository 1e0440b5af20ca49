//! # Image Thresholding Module
//!
//! Binary thresholding by color range: each pixel is marked as scalp when all
//! three channels fall inside the active category's bounds.

use image::{GrayImage, Luma, RgbImage};
use tracing;

use super::types::ScalpMaskResult;
use crate::color_ranges::ColorRange;

/// Mask value for scalp-colored pixels
pub const MASK_ON: u8 = 255;
/// Mask value for everything else
pub const MASK_OFF: u8 = 0;

/// Builds the binary scalp mask for a cropped RGB image.
///
/// The output has the same dimensions as the input. Total over any input,
/// including images with no scalp-colored pixels at all.
///
/// # Examples
///
/// ```
/// use image::{Rgb, RgbImage};
/// use scalp_meter::color_ranges::category_to_range;
/// use scalp_meter::preprocessing::build_scalp_mask;
///
/// let img = RgbImage::from_pixel(4, 4, Rgb([200, 160, 120]));
/// let result = build_scalp_mask(&img, &category_to_range("black"));
/// assert_eq!(result.scalp_pixels, 16);
/// ```
pub fn build_scalp_mask(image: &RgbImage, range: &ColorRange) -> ScalpMaskResult {
    let start_time = std::time::Instant::now();

    let mut mask = GrayImage::new(image.width(), image.height());
    let mut scalp_pixels = 0u64;

    for (x, y, pixel) in image.enumerate_pixels() {
        if range.contains(pixel) {
            mask.put_pixel(x, y, Luma([MASK_ON]));
            scalp_pixels += 1;
        }
    }

    let processing_time = start_time.elapsed();

    tracing::debug!(
        target: "scalp_meter::preprocessing",
        "Color thresholding completed in {}ms: scalp_pixels={}, dimensions={}x{}",
        processing_time.as_millis(),
        scalp_pixels,
        mask.width(),
        mask.height()
    );

    ScalpMaskResult {
        mask,
        scalp_pixels,
        processing_time_ms: processing_time.as_millis() as u32,
    }
}
