//! Upload validation: extension allow-list, size cap, and filename
//! sanitization. Pure functions, no I/O.

use std::path::Path;

/// Validation errors for uploaded files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No file field in request")]
    MissingFile,

    #[error("Missing filename")]
    MissingFilename,

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Unsupported file format '{extension}' (allowed: {allowed:?})")]
    UnsupportedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },
}

/// Upload validator
///
/// Holds the configured size cap and extension allow-list. Size is always
/// the server-measured byte count; callers must never trust a declared
/// content length.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size_bytes: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size_bytes,
            allowed_extensions,
        }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Extract and check the extension against the allow-list
    /// (case-insensitive). Returns the extension as the client wrote it,
    /// without the leading dot.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string)
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            return Err(ValidationError::UnsupportedExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Check a measured byte count against the cap. Zero-byte files are
    /// allowed; only the upper bound is enforced.
    pub fn validate_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size_bytes,
            });
        }
        Ok(())
    }
}

/// Sanitize a client-supplied filename for display and metadata.
///
/// Strips any path components and replaces characters outside
/// `[A-Za-z0-9._-]`. The result is never used as an on-disk path; stored
/// names are always freshly generated.
pub fn sanitize_original_name(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['_', '.']).is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
