//! Upload filename checks.

use thiserror::Error;

/// Image extensions accepted for upload (compared case-insensitively)
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("filename is empty")]
    Empty,

    #[error("filename must not contain path components: {0}")]
    Unsafe(String),

    #[error("extension not allowed: {0}")]
    DisallowedExtension(String),
}

/// Whether `filename` ends in an allowed image extension.
///
/// The extension is the text after the last `.`; a name without a `.` is
/// never allowed.
pub fn is_allowed_filename(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Validate an uploaded filename before anything is written.
///
/// The name is used verbatim as the stored file name and manifest key, so it
/// must be a single path component.
pub fn validate_filename(filename: &str) -> Result<(), FilenameError> {
    if filename.is_empty() {
        return Err(FilenameError::Empty);
    }
    if filename == "." || filename == ".." || filename.contains(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(FilenameError::Unsafe(filename.to_string()));
    }
    if !is_allowed_filename(filename) {
        return Err(FilenameError::DisallowedExtension(filename.to_string()));
    }
    Ok(())
}
