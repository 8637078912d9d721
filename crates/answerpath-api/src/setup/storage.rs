//! Blob storage setup and initialization

use anyhow::Result;
use answerpath_core::Config;
use answerpath_storage::{BlobStore, LocalBlobStore};
use std::sync::Arc;

/// Setup the blob store backing the upload pipeline.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn BlobStore>> {
    tracing::info!(upload_dir = %config.upload_dir, "Initializing blob storage...");

    let store = LocalBlobStore::new(config.upload_dir.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize blob storage: {}", e))?;

    tracing::info!("Blob storage initialized successfully");

    Ok(Arc::new(store))
}
