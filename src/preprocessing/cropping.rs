//! # Image Cropping Module
//!
//! Decodes uploaded bytes to RGB and isolates the central region of the photo,
//! discarding background and edges before thresholding.

use image::RgbImage;
use std::time::Instant;
use tracing;

use super::types::{CropBox, CroppedImageResult, PreprocessingError};
use crate::analysis_config::CropRegion;

/// Decodes raw image bytes into an 8-bit RGB buffer.
///
/// The format is sniffed from the leading bytes; any alpha channel or
/// grayscale data is converted to three channels.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, PreprocessingError> {
    let format = image::guess_format(bytes).map_err(|e| PreprocessingError::ImageLoad {
        message: format!("Unrecognized image format: {}", e),
    })?;

    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        PreprocessingError::ImageLoad {
            message: format!("Failed to decode {:?} image: {}", format, e),
        }
    })?;

    Ok(decoded.to_rgb8())
}

/// Crops the configured fractional window out of an RGB image.
///
/// Every bound is `fraction * dimension` rounded to the nearest pixel (half away
/// from zero) and clamped to the image, so the same input and window always
/// yield the same box.
///
/// # Arguments
///
/// * `image` - The decoded RGB image
/// * `region` - Fractional crop window (central 50%x50% by default)
///
/// # Returns
///
/// Returns a `CroppedImageResult`, or `PreprocessingError::EmptyRegion` when the
/// window collapses to zero width or height.
///
/// # Examples
///
/// ```
/// use image::RgbImage;
/// use scalp_meter::analysis_config::CropRegion;
/// use scalp_meter::preprocessing::crop_center;
///
/// let img = RgbImage::new(100, 60);
/// let result = crop_center(&img, &CropRegion::default()).unwrap();
/// assert_eq!(result.image.dimensions(), (50, 30));
/// ```
pub fn crop_center(
    image: &RgbImage,
    region: &CropRegion,
) -> Result<CroppedImageResult, PreprocessingError> {
    let start_time = Instant::now();

    let (img_width, img_height) = image.dimensions();
    let crop_box = calculate_crop_box(img_width, img_height, region);

    if crop_box.is_empty() {
        tracing::debug!(
            "Crop window {:?} is empty for {}x{} image",
            crop_box,
            img_width,
            img_height
        );
        return Err(PreprocessingError::EmptyRegion {
            width: crop_box.width(),
            height: crop_box.height(),
        });
    }

    let cropped_img = image::imageops::crop_imm(
        image,
        crop_box.x0,
        crop_box.y0,
        crop_box.width(),
        crop_box.height(),
    )
    .to_image();

    let processing_time_ms = start_time.elapsed().as_millis() as u32;

    tracing::debug!(
        "Cropped center region from {}x{} image: crop region {:?}, result {}x{}",
        img_width,
        img_height,
        crop_box,
        cropped_img.width(),
        cropped_img.height()
    );

    Ok(CroppedImageResult {
        image: cropped_img,
        original_dimensions: (img_width, img_height),
        cropped_region: crop_box,
        processing_time_ms,
    })
}

/// Decodes bytes and crops the central region in one step.
pub fn load_and_crop_center(
    bytes: &[u8],
    region: &CropRegion,
) -> Result<CroppedImageResult, PreprocessingError> {
    let image = decode_rgb(bytes)?;
    crop_center(&image, region)
}

/// Converts a fractional window into a pixel box for the given dimensions.
///
/// Bounds round half away from zero, not half to even, so a 10x10 photo
/// crops to 5x5 under the default window.
pub fn calculate_crop_box(width: u32, height: u32, region: &CropRegion) -> CropBox {
    let scale = |fraction: f64, extent: u32| -> u32 {
        let value = (fraction * extent as f64).round();
        if value <= 0.0 {
            0
        } else {
            (value as u32).min(extent)
        }
    };

    let x0 = scale(region.left, width);
    let y0 = scale(region.top, height);
    let x1 = scale(region.right, width).max(x0);
    let y1 = scale(region.bottom, height).max(y0);

    CropBox::new(x0, y0, x1, y1)
}
