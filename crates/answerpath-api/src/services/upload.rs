//! Document upload pipeline
//!
//! Orchestrates the full upload flow: validation, user upsert, blob write,
//! document row creation, and the transition to `processed`. All
//! collaborators are injected, so the pipeline can be exercised against a
//! temporary directory and a throwaway database in tests.

use crate::auth::CallerIdentity;
use crate::error::{storage_error_to_app_error, validation_error_to_app_error};
use answerpath_core::models::{Document, DocumentMetadata};
use answerpath_core::{AppError, UploadValidator};
use answerpath_db::{DocumentRepository, UserRepository};
use answerpath_storage::BlobStore;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct UploadPipeline {
    users: UserRepository,
    documents: DocumentRepository,
    storage: Arc<dyn BlobStore>,
    validator: UploadValidator,
}

impl UploadPipeline {
    pub fn new(
        users: UserRepository,
        documents: DocumentRepository,
        storage: Arc<dyn BlobStore>,
        validator: UploadValidator,
    ) -> Self {
        Self {
            users,
            documents,
            storage,
            validator,
        }
    }

    /// Run the upload flow for an authenticated caller.
    ///
    /// Validation happens before any write. The blob is saved before the row
    /// is inserted; if the insert fails the blob is deleted best-effort in the
    /// background so storage does not accumulate orphans.
    #[tracing::instrument(
        skip(self, identity, data),
        fields(user.email = %identity.email, file.size = data.len())
    )]
    pub async fn handle_upload(
        &self,
        identity: &CallerIdentity,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<Document, AppError> {
        self.validator
            .validate_filename(file_name)
            .map_err(validation_error_to_app_error)?;
        self.validator
            .validate_content_type(content_type)
            .map_err(validation_error_to_app_error)?;
        self.validator
            .validate_file_size(data.len())
            .map_err(validation_error_to_app_error)?;

        let user = self
            .users
            .find_or_create(
                &identity.email,
                identity.name.as_deref(),
                identity.image.as_deref(),
            )
            .await?;

        let file_size = data.len() as i64;
        let locator = self
            .storage
            .save(file_name, data)
            .await
            .map_err(storage_error_to_app_error)?;

        let metadata = DocumentMetadata {
            original_name: file_name.to_string(),
            uploaded_at: Utc::now(),
        };

        let document = match self
            .documents
            .create(
                user.id,
                file_name,
                file_name,
                file_size,
                content_type,
                &locator,
                serde_json::to_value(&metadata)?,
            )
            .await
        {
            Ok(document) => document,
            Err(e) => {
                // Cleanup storage on database failure
                let storage = self.storage.clone();
                let orphan = locator.clone();
                tokio::spawn(async move {
                    if let Err(cleanup_err) = storage.delete(&orphan).await {
                        tracing::debug!(
                            error = %cleanup_err,
                            locator = %orphan,
                            "Failed to cleanup blob after DB error"
                        );
                    }
                });
                return Err(e);
            }
        };

        let document = self.documents.mark_processed(document.id).await?;

        tracing::info!(
            document.id = %document.id,
            user.id = %user.id,
            file.name = %document.file_name,
            file.size = document.file_size,
            "Document uploaded"
        );

        Ok(document)
    }
}
