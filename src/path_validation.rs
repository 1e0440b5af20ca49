//! Path validation for serving static tier images.
//!
//! Requested image names come straight from the URL, so they are checked
//! before touching the filesystem:
//!
//! - Path traversal (`..`, URL-encoded `%2e%2e`)
//! - Path separators and null bytes
//! - Forbidden and control characters
//! - Length limits
//! - Reserved names (Windows compatibility)
//!
//! ```rust
//! use scalp_meter::path_validation::validate_filename;
//!
//! assert!(validate_filename("5.png").is_ok());
//! assert!(validate_filename("../secrets.txt").is_err());
//! ```

use std::path::{Path, PathBuf};

/// Errors that can occur during path validation
#[derive(Debug, Clone, PartialEq)]
pub enum PathValidationError {
    /// Name contains traversal sequences (..)
    PathTraversal,
    /// Name contains null bytes
    NullByte,
    /// Name contains a path separator
    SeparatorNotAllowed,
    /// Name contains invalid characters
    InvalidCharacters,
    /// Filename is too long
    FilenameTooLong,
    /// Filename uses reserved name
    ReservedName,
    /// Empty name provided
    EmptyPath,
}

/// Result type for path validation operations
pub type PathValidationResult<T> = Result<T, PathValidationError>;

/// Maximum allowed filename length (255 bytes on most filesystems)
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Reserved filenames that should not be used (Windows compatibility)
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters that are not allowed in filenames
pub const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Validate a single filename for use under the static image directory
pub fn validate_filename(filename: &str) -> PathValidationResult<()> {
    if filename.is_empty() {
        return Err(PathValidationError::EmptyPath);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(PathValidationError::FilenameTooLong);
    }

    if filename.contains('\0') {
        return Err(PathValidationError::NullByte);
    }

    if contains_path_traversal(filename) {
        return Err(PathValidationError::PathTraversal);
    }

    if filename.contains('/') || filename.contains('\\') {
        return Err(PathValidationError::SeparatorNotAllowed);
    }

    // Check for reserved names (case-insensitive)
    let filename_upper = filename.to_uppercase();
    let name_without_ext = filename_upper.split('.').next().unwrap_or("");
    if RESERVED_NAMES.contains(&name_without_ext) {
        return Err(PathValidationError::ReservedName);
    }

    if filename
        .chars()
        .any(|c| FORBIDDEN_FILENAME_CHARS.contains(&c) || c.is_control())
    {
        return Err(PathValidationError::InvalidCharacters);
    }

    Ok(())
}

/// Check if a name contains traversal sequences, plain or URL-encoded
fn contains_path_traversal(name: &str) -> bool {
    if name == "." || name == ".." {
        return true;
    }

    if name.contains("..") {
        let has_parent = Path::new(name)
            .components()
            .any(|component| matches!(component, std::path::Component::ParentDir));
        if has_parent {
            return true;
        }
    }

    let lower = name.to_ascii_lowercase();
    lower.contains("%2e%2e") || lower.contains("%2f") || lower.contains("%5c")
}

/// Join a validated filename onto the image directory
pub fn resolve_static_image(image_dir: &Path, filename: &str) -> PathValidationResult<PathBuf> {
    validate_filename(filename)?;
    Ok(image_dir.join(filename))
}

/// Content type for a served image, chosen by extension
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

impl std::fmt::Display for PathValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathValidationError::PathTraversal => {
                write!(f, "Path contains directory traversal sequences")
            }
            PathValidationError::NullByte => write!(f, "Path contains null bytes"),
            PathValidationError::SeparatorNotAllowed => {
                write!(f, "Path separators are not allowed in filenames")
            }
            PathValidationError::InvalidCharacters => write!(f, "Path contains invalid characters"),
            PathValidationError::FilenameTooLong => write!(f, "Filename is too long"),
            PathValidationError::ReservedName => write!(f, "Filename uses reserved name"),
            PathValidationError::EmptyPath => write!(f, "Path is empty"),
        }
    }
}

impl std::error::Error for PathValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tier_image_names() {
        for name in ["1.png", "2.png", "3.png", "4.png", "5.png", "tier-final.jpeg"] {
            assert!(validate_filename(name).is_ok(), "{} should be accepted", name);
        }
    }

    #[test]
    fn test_validate_path_traversal() {
        assert_eq!(
            validate_filename(".."),
            Err(PathValidationError::PathTraversal)
        );
        assert_eq!(
            validate_filename("../etc/passwd"),
            Err(PathValidationError::PathTraversal)
        );
        assert_eq!(
            validate_filename("%2e%2e%2fsecret"),
            Err(PathValidationError::PathTraversal)
        );
        // Double dots inside a name are fine
        assert!(validate_filename("final..png").is_ok());
    }

    #[test]
    fn test_validate_separators_and_null_bytes() {
        assert_eq!(
            validate_filename("img/1.png"),
            Err(PathValidationError::SeparatorNotAllowed)
        );
        assert_eq!(
            validate_filename("img\\1.png"),
            Err(PathValidationError::SeparatorNotAllowed)
        );
        assert_eq!(
            validate_filename("1.png\0"),
            Err(PathValidationError::NullByte)
        );
    }

    #[test]
    fn test_reserved_and_forbidden() {
        assert_eq!(
            validate_filename("con.png"),
            Err(PathValidationError::ReservedName)
        );
        assert_eq!(
            validate_filename("a<b>.png"),
            Err(PathValidationError::InvalidCharacters)
        );
        assert_eq!(validate_filename(""), Err(PathValidationError::EmptyPath));
    }

    #[test]
    fn test_length_limits() {
        let long_name = format!("{}.png", "a".repeat(MAX_FILENAME_LENGTH));
        assert_eq!(
            validate_filename(&long_name),
            Err(PathValidationError::FilenameTooLong)
        );
    }

    #[test]
    fn test_resolve_static_image() {
        let dir = Path::new("/srv/static/img");
        assert_eq!(
            resolve_static_image(dir, "3.png"),
            Ok(PathBuf::from("/srv/static/img/3.png"))
        );
        assert!(resolve_static_image(dir, "../../index.html").is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("1.png"), "image/png");
        assert_eq!(content_type_for("1.JPG"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PathValidationError::PathTraversal.to_string(),
            "Path contains directory traversal sequences"
        );
        assert_eq!(PathValidationError::EmptyPath.to_string(), "Path is empty");
    }
}
