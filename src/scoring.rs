//! # Scalp Scoring
//!
//! Turns a refined mask into an integer scalp-visibility percentage.

use image::GrayImage;
use serde::Serialize;

use crate::analysis_errors::AnalysisError;

/// Upper bound of every score
pub const MAX_SCORE: u8 = 100;

/// Scalp visibility percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Build a score from any raw percentage, clamping at 100.
    pub fn clamped(raw: u64) -> Self {
        Score(raw.min(MAX_SCORE as u64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes `min(100, floor(100 * scalp_pixels / total_pixels))`.
///
/// Integer arithmetic keeps the floor exact. A zero `total_pixels` is reported
/// as `AnalysisError::EmptyImage` instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use scalp_meter::scoring::compute_score;
///
/// assert_eq!(compute_score(29, 100).unwrap().value(), 29);
/// assert_eq!(compute_score(1, 3).unwrap().value(), 33);
/// assert!(compute_score(0, 0).is_err());
/// ```
pub fn compute_score(scalp_pixels: u64, total_pixels: u64) -> Result<Score, AnalysisError> {
    if total_pixels == 0 {
        return Err(AnalysisError::EmptyImage {
            width: 0,
            height: 0,
        });
    }

    let raw = scalp_pixels.saturating_mul(100) / total_pixels;
    Ok(Score::clamped(raw))
}

/// Scores a binary mask: every non-zero pixel counts as scalp.
pub fn score_mask(mask: &GrayImage) -> Result<Score, AnalysisError> {
    let (width, height) = mask.dimensions();
    let total_pixels = width as u64 * height as u64;
    if total_pixels == 0 {
        return Err(AnalysisError::EmptyImage { width, height });
    }

    let scalp_pixels = count_scalp_pixels(mask);
    compute_score(scalp_pixels, total_pixels)
}

/// Number of non-zero mask pixels
pub fn count_scalp_pixels(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p[0] != 0).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_compute_score_floors() {
        assert_eq!(compute_score(0, 10).unwrap().value(), 0);
        assert_eq!(compute_score(999, 1000).unwrap().value(), 99);
        assert_eq!(compute_score(2, 3).unwrap().value(), 66);
        assert_eq!(compute_score(10, 10).unwrap().value(), 100);
    }

    #[test]
    fn test_compute_score_clamps_above_100() {
        // More scalp pixels than pixels cannot come from a real mask
        assert_eq!(compute_score(250, 100).unwrap().value(), 100);
        assert_eq!(compute_score(u64::MAX, 1).unwrap().value(), 100);
        assert_eq!(Score::clamped(1_000).value(), 100);
    }

    #[test]
    fn test_compute_score_zero_total() {
        assert!(matches!(
            compute_score(5, 0),
            Err(AnalysisError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_score_mask_empty_mask_is_error() {
        let mask = GrayImage::new(0, 7);
        assert_eq!(
            score_mask(&mask),
            Err(AnalysisError::EmptyImage { width: 0, height: 7 })
        );
    }

    #[test]
    fn test_score_mask_is_repeatable() {
        let mut mask = GrayImage::new(10, 10);
        for x in 0..10 {
            for y in 0..4 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        let first = score_mask(&mask).unwrap();
        let second = score_mask(&mask).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.value(), 40);
    }

    #[test]
    fn test_score_serializes_as_integer() {
        let json = serde_json::to_string(&Score::clamped(42)).unwrap();
        assert_eq!(json, "42");
    }
}
