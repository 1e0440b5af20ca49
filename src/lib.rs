//! # Scalp Meter
//!
//! Estimates how much scalp is visible in a top-of-head photo. The photo is
//! center-cropped, thresholded against a hair-color-specific scalp color
//! range, refined with a morphological closing, and scored as the percentage
//! of scalp pixels. The score maps onto one of five humorous result tiers.

pub mod analysis;
pub mod analysis_config;
pub mod analysis_errors;
pub mod color_ranges;
pub mod config;
pub mod errors;
pub mod observability;
pub mod observability_config;
pub mod path_validation;
pub mod preprocessing;
pub mod scoring;
pub mod server;
pub mod tiers;

// Re-export types for easier access
pub use analysis::{analyze, AnalysisOutcome};
pub use analysis_errors::AnalysisError;
pub use scoring::Score;
pub use tiers::{tier_for_score, ResultRecord, ResultTier};
