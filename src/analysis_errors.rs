//! # Analysis Error Types Module
//!
//! This module defines the error types produced by the scalp analysis pipeline.
//! Unknown hair-color categories are deliberately absent: they fall back to the
//! `black` color range and never fail.

/// Custom error types for scalp analysis operations
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Upload payload rejected before decoding (empty, oversized)
    Validation(String),
    /// Image bytes could not be decoded
    Decode(String),
    /// Cropped region has zero area, so no score can be computed
    EmptyImage { width: u32, height: u32 },
    /// Analysis exceeded the configured wall-clock limit
    Timeout(String),
    /// The blocking analysis task panicked or was cancelled
    Internal(String),
}

impl AnalysisError {
    /// Short stable label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation",
            AnalysisError::Decode(_) => "decode",
            AnalysisError::EmptyImage { .. } => "empty_image",
            AnalysisError::Timeout(_) => "timeout",
            AnalysisError::Internal(_) => "internal",
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Validation(msg) => write!(f, "[VALIDATION] Upload validation failed: {}", msg),
            AnalysisError::Decode(msg) => write!(f, "[DECODE] Failed to decode uploaded image: {}", msg),
            AnalysisError::EmptyImage { width, height } => write!(
                f,
                "[EMPTY_IMAGE] Cropped region has no pixels ({}x{})",
                width, height
            ),
            AnalysisError::Timeout(msg) => write!(f, "[TIMEOUT] Scalp analysis timed out: {}", msg),
            AnalysisError::Internal(msg) => write!(f, "[INTERNAL] Scalp analysis task failed: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<image::ImageError> for AnalysisError {
    fn from(err: image::ImageError) -> Self {
        AnalysisError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_kind_prefix() {
        let err = AnalysisError::EmptyImage { width: 0, height: 4 };
        assert_eq!(err.to_string(), "[EMPTY_IMAGE] Cropped region has no pixels (0x4)");
        assert!(AnalysisError::Decode("bad header".to_string())
            .to_string()
            .starts_with("[DECODE]"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(AnalysisError::Validation(String::new()).kind(), "validation");
        assert_eq!(AnalysisError::Decode(String::new()).kind(), "decode");
        assert_eq!(AnalysisError::EmptyImage { width: 0, height: 0 }.kind(), "empty_image");
        assert_eq!(AnalysisError::Timeout(String::new()).kind(), "timeout");
        assert_eq!(AnalysisError::Internal(String::new()).kind(), "internal");
    }
}
