//! File metadata types and filename handling.

use super::MAX_FILENAME_LENGTH;
use crate::{FmngrError, Result};

/// Catalog record for one stored blob.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FileMetadata {
    /// Unique file ID.
    pub id: i64,
    /// Filename without extension.
    pub title: String,
    /// Size in bytes, as measured on disk after the write.
    pub size: i64,
    /// Extension including the leading dot, or empty.
    pub ext: String,
    /// Storage holding the blob.
    pub storage_id: i64,
}

impl FileMetadata {
    /// Name of the blob inside its storage directory.
    pub fn filename(&self) -> String {
        format!("{}{}", self.title, self.ext)
    }
}

/// Data for creating a new file row.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub title: String,
    pub size: i64,
    pub ext: String,
    pub storage_id: i64,
}

impl NewFile {
    /// Create a new file row from an already sanitized filename.
    pub fn new(filename: &str, size: i64, storage_id: i64) -> Self {
        let (title, ext) = split_filename(filename);
        Self {
            title: title.to_string(),
            size,
            ext: ext.to_string(),
            storage_id,
        }
    }
}

/// File metadata together with its content.
#[derive(Debug, Clone)]
pub struct FileWithContent {
    pub file: FileMetadata,
    /// Blob bytes, base64 encoded (standard alphabet, padded).
    pub base64_value: String,
}

/// Check that an uploaded filename names a single entry in a storage directory.
///
/// The name is returned unchanged when accepted.
pub fn sanitize_filename(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(FmngrError::Validation("filename is empty".to_string()));
    }
    if name == "." || name == ".." {
        return Err(FmngrError::Validation(format!(
            "filename '{name}' is not allowed"
        )));
    }
    if name.len() > MAX_FILENAME_LENGTH {
        return Err(FmngrError::Validation(format!(
            "filename must be at most {MAX_FILENAME_LENGTH} bytes"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(FmngrError::Validation(
            "filename must not contain path separators".to_string(),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(FmngrError::Validation(
            "filename contains control characters".to_string(),
        ));
    }
    Ok(name)
}

/// Split a filename into title and extension at the last dot.
///
/// The extension keeps its dot; a name without a dot has an empty extension.
pub fn split_filename(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    }
}
