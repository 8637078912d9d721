//! Shared constants for upload limits and accepted document types.

/// Maximum upload size accepted by the pipeline: 10 MiB.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for document upload (PDF, DOCX, XLSX, XLS, plain text).
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/plain",
];
