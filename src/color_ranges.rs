//! # Scalp Color Ranges
//!
//! RGB bounds that classify a pixel as scalp-colored, keyed by the hair-color
//! category the user reports. The table is built once and never mutated.
//!
//! All four categories currently share the same bounds. Per-category tuning was
//! never supplied, so the shared values are kept until real ones exist.

use image::Rgb;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Category used whenever the reported hair color is not in the table
pub const DEFAULT_CATEGORY: &str = "black";

/// Inclusive per-channel RGB bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub r_min: u8,
    pub r_max: u8,
    pub g_min: u8,
    pub g_max: u8,
    pub b_min: u8,
    pub b_max: u8,
}

impl ColorRange {
    pub const fn new(r_min: u8, r_max: u8, g_min: u8, g_max: u8, b_min: u8, b_max: u8) -> Self {
        Self {
            r_min,
            r_max,
            g_min,
            g_max,
            b_min,
            b_max,
        }
    }

    /// True when every channel lies within its bounds
    #[inline]
    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        let [r, g, b] = pixel.0;
        (self.r_min..=self.r_max).contains(&r)
            && (self.g_min..=self.g_max).contains(&g)
            && (self.b_min..=self.b_max).contains(&b)
    }

    /// min <= max on every channel
    pub fn is_well_formed(&self) -> bool {
        self.r_min <= self.r_max && self.g_min <= self.g_max && self.b_min <= self.b_max
    }
}

const SHARED_SCALP_RANGE: ColorRange = ColorRange::new(160, 255, 110, 225, 80, 205);

lazy_static! {
    static ref SCALP_COLOR_RANGES: HashMap<&'static str, ColorRange> = {
        let mut ranges = HashMap::new();
        ranges.insert("black", SHARED_SCALP_RANGE);
        ranges.insert("dark_brown", SHARED_SCALP_RANGE);
        ranges.insert("light_brown", SHARED_SCALP_RANGE);
        ranges.insert("dyed", SHARED_SCALP_RANGE);
        ranges
    };
}

/// Hair-color categories offered to users, in display order
pub const HAIR_COLOR_CATEGORIES: [&str; 4] = ["black", "dark_brown", "light_brown", "dyed"];

/// Resolve the scalp color range for a reported hair-color category.
///
/// Total over all strings: anything not in the table resolves to the
/// [`DEFAULT_CATEGORY`] range. Matching is exact (case-sensitive, no trimming).
///
/// # Examples
///
/// ```
/// use scalp_meter::color_ranges::category_to_range;
///
/// assert_eq!(category_to_range("purple"), category_to_range("black"));
/// ```
pub fn category_to_range(category: &str) -> ColorRange {
    match SCALP_COLOR_RANGES.get(category) {
        Some(range) => *range,
        None => {
            tracing::debug!(
                category = %category,
                fallback = DEFAULT_CATEGORY,
                "Unknown hair color category, using default range"
            );
            SCALP_COLOR_RANGES
                .get(DEFAULT_CATEGORY)
                .copied()
                .unwrap_or(SHARED_SCALP_RANGE)
        }
    }
}

/// Whether the category has its own table entry
pub fn is_known_category(category: &str) -> bool {
    SCALP_COLOR_RANGES.contains_key(category)
}

/// Check that every table entry is well formed and the default is present
pub fn validate_color_table() -> Result<(), String> {
    if !SCALP_COLOR_RANGES.contains_key(DEFAULT_CATEGORY) {
        return Err(format!("default category '{}' is missing", DEFAULT_CATEGORY));
    }
    for (category, range) in SCALP_COLOR_RANGES.iter() {
        if !range.is_well_formed() {
            return Err(format!("color range for '{}' has min > max", category));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_share_bounds() {
        for category in HAIR_COLOR_CATEGORIES {
            assert!(is_known_category(category));
            assert_eq!(category_to_range(category), SHARED_SCALP_RANGE);
        }
    }

    #[test]
    fn test_unknown_category_falls_back_to_black() {
        let black = category_to_range("black");
        assert_eq!(category_to_range("blonde"), black);
        assert_eq!(category_to_range(""), black);
        // Matching is exact
        assert!(!is_known_category("Black"));
        assert_eq!(category_to_range("Black"), black);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = category_to_range("black");
        assert!(range.contains(&Rgb([160, 110, 80])));
        assert!(range.contains(&Rgb([255, 225, 205])));
        assert!(!range.contains(&Rgb([159, 150, 150])));
        assert!(!range.contains(&Rgb([200, 226, 150])));
        assert!(!range.contains(&Rgb([200, 150, 79])));
    }

    #[test]
    fn test_color_table_is_valid() {
        assert!(validate_color_table().is_ok());
        assert!(!ColorRange::new(10, 5, 0, 0, 0, 0).is_well_formed());
    }
}
