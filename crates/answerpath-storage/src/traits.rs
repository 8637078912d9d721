//! Blob store abstraction trait
//!
//! This module defines the BlobStore trait that storage backends implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store abstraction
///
/// The upload pipeline persists raw file bytes through this trait and keeps
/// only the returned locator in the document record. Callers never interpret
/// locators; they are opaque handles minted by [`BlobStore::save`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `data` under a collision-resistant name derived from
    /// `file_name` and return the locator for later retrieval or deletion.
    ///
    /// After a successful return the bytes are durable and retrievable via
    /// the same locator. Concurrent saves of the same filename produce
    /// distinct locators.
    async fn save(&self, file_name: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Read back the full contents of a blob.
    async fn get(&self, locator: &str) -> StorageResult<Vec<u8>>;

    /// Delete a blob. Deleting a locator that no longer exists is a no-op,
    /// so document deletion can always converge even after a partial failure.
    async fn delete(&self, locator: &str) -> StorageResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, locator: &str) -> StorageResult<bool>;
}
