use crate::locators::generate_locator;
use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem blob store
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore rooted at `base_path`.
    ///
    /// The root directory is created if it does not exist.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore { base_path })
    }

    /// Convert a locator to a filesystem path with traversal validation.
    ///
    /// Locators are flat filenames minted by `save`; anything containing a
    /// parent reference or an absolute prefix is rejected before touching
    /// the filesystem.
    fn locator_to_path(&self, locator: &str) -> StorageResult<PathBuf> {
        if locator.is_empty()
            || locator.contains("..")
            || locator.contains('/')
            || locator.contains('\\')
        {
            return Err(StorageError::InvalidLocator(
                "Locator contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(locator))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, file_name: &str, data: Vec<u8>) -> StorageResult<String> {
        let size = data.len();
        let start = std::time::Instant::now();

        // Two saves of the same filename within one millisecond would mint
        // the same locator; bump the timestamp until the path is free.
        let mut timestamp = Utc::now().timestamp_millis();
        let (locator, path) = loop {
            let locator = generate_locator(file_name, timestamp);
            let path = self.locator_to_path(&locator)?;
            if !fs::try_exists(&path).await.unwrap_or(false) {
                break (locator, path);
            }
            timestamp += 1;
        };

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            locator = %locator,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob saved"
        );

        Ok(locator)
    }

    async fn get(&self, locator: &str) -> StorageResult<Vec<u8>> {
        let path = self.locator_to_path(locator)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(locator.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            locator = %locator,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob read"
        );

        Ok(data)
    }

    async fn delete(&self, locator: &str) -> StorageResult<()> {
        let path = self.locator_to_path(locator)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(locator = %locator, "Blob deleted");

        Ok(())
    }

    async fn exists(&self, locator: &str) -> StorageResult<bool> {
        let path = self.locator_to_path(locator)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}
