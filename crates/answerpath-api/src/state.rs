//! Application state shared across handlers.

use crate::services::upload::UploadPipeline;
use answerpath_core::{Config, UploadValidator};
use answerpath_db::{DocumentRepository, UserRepository};
use answerpath_storage::BlobStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state.
///
/// Constructed once during startup; repositories and the blob store are
/// injected here so handlers and the upload pipeline never reach for
/// process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub users: UserRepository,
    pub documents: DocumentRepository,
    pub storage: Arc<dyn BlobStore>,
    pub uploads: UploadPipeline,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, storage: Arc<dyn BlobStore>) -> Self {
        let users = UserRepository::new(pool.clone());
        let documents = DocumentRepository::new(pool.clone());
        let validator = UploadValidator::new(
            config.max_upload_size_bytes,
            config.allowed_content_types.clone(),
        );
        let uploads = UploadPipeline::new(
            users.clone(),
            documents.clone(),
            storage.clone(),
            validator,
        );

        Self {
            config,
            pool,
            users,
            documents,
            storage,
            uploads,
        }
    }
}
