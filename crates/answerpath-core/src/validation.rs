//! Upload validation
//!
//! Size and content-type checks applied by the upload pipeline before any
//! storage or database write, and defensively re-applied by the document
//! repository at insert time.

use crate::constants;

/// Validation errors for uploaded files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

/// Normalize a MIME type by stripping parameters
/// (e.g. "text/plain; charset=utf-8" -> "text/plain").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Upload validator
///
/// Holds the size cap and content-type allowlist for one upload surface,
/// without coupling to storage or database details.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_content_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types,
        }
    }

    /// Validator with the built-in document limits (10 MiB; PDF, DOCX, XLSX, XLS, TXT).
    pub fn default_documents() -> Self {
        Self::new(
            constants::MAX_FILE_SIZE_BYTES,
            constants::ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    /// Validate file size; empty files are rejected.
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate content type against the allowlist. MIME parameters are
    /// stripped before comparison so "text/plain; charset=utf-8" passes.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = normalize_mime_type(content_type).to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct.to_lowercase() == normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate a filename is usable for storage (non-empty, no path separators).
    pub fn validate_filename(&self, filename: &str) -> Result<(), ValidationError> {
        if filename.trim().is_empty() {
            return Err(ValidationError::InvalidFilename(
                "Filename must not be empty".to_string(),
            ));
        }

        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(ValidationError::InvalidFilename(format!(
                "Filename contains path separators: {}",
                filename
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_document_types_accepted() {
        let validator = UploadValidator::default_documents();
        for ct in constants::ALLOWED_CONTENT_TYPES {
            assert!(validator.validate_content_type(ct).is_ok(), "{}", ct);
        }
    }

    #[test]
    fn test_zip_rejected() {
        let validator = UploadValidator::default_documents();
        let err = validator
            .validate_content_type("application/zip")
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidContentType { .. }));
    }

    #[test]
    fn test_mime_parameters_stripped() {
        let validator = UploadValidator::default_documents();
        assert!(validator
            .validate_content_type("text/plain; charset=utf-8")
            .is_ok());
        assert!(validator.validate_content_type("Text/Plain").is_ok());
    }

    #[test]
    fn test_size_boundary() {
        let validator = UploadValidator::default_documents();
        assert!(validator.validate_file_size(10 * 1024 * 1024).is_ok());
        let err = validator.validate_file_size(10 * 1024 * 1024 + 1).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FileTooLarge {
                size: 10_485_761,
                max: 10_485_760
            }
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let validator = UploadValidator::default_documents();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_filename_with_path_separators_rejected() {
        let validator = UploadValidator::default_documents();
        assert!(validator.validate_filename("notes.txt").is_ok());
        assert!(validator.validate_filename("../etc/passwd").is_err());
        assert!(validator.validate_filename("a/b.txt").is_err());
        assert!(validator.validate_filename("  ").is_err());
    }
}
