use answerpath_core::constants::{ALLOWED_CONTENT_TYPES, MAX_FILE_SIZE_BYTES};
use answerpath_core::models::{Document, DocumentStatus, DocumentSummary};
use answerpath_core::AppError;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing documents
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new document row with status `processing`.
    ///
    /// File type and size are re-checked here so that no caller can insert a
    /// row that would be rejected at upload time.
    #[tracing::instrument(
        skip(self, metadata),
        fields(db.table = "documents", db.operation = "insert")
    )]
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        file_path: &str,
        metadata: JsonValue,
    ) -> Result<Document, AppError> {
        if !ALLOWED_CONTENT_TYPES.contains(&file_type) {
            return Err(AppError::InvalidInput(format!(
                "Unsupported file type: {file_type}"
            )));
        }
        if file_size <= 0 {
            return Err(AppError::InvalidInput(
                "File size must be positive".to_string(),
            ));
        }
        if file_size as usize > MAX_FILE_SIZE_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "File size {file_size} exceeds maximum of {MAX_FILE_SIZE_BYTES} bytes"
            )));
        }

        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            INSERT INTO documents (user_id, title, file_name, file_size, file_type, file_path, status, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, file_name, file_size, file_type, file_path, status, metadata, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(file_name)
        .bind(file_size)
        .bind(file_type)
        .bind(file_path)
        .bind(DocumentStatus::Processing)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// Transition a document to status `processed`
    #[tracing::instrument(
        skip(self),
        fields(db.table = "documents", db.operation = "update", db.record_id = %id)
    )]
    pub async fn mark_processed(&self, id: Uuid) -> Result<Document, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            UPDATE documents
            SET status = $2
            WHERE id = $1
            RETURNING id, user_id, title, file_name, file_size, file_type, file_path, status, metadata, created_at
            "#,
        )
        .bind(id)
        .bind(DocumentStatus::Processed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;

        Ok(document)
    }

    /// List a user's documents, newest first.
    ///
    /// Only summary columns are selected; file_path and metadata never leave
    /// the repository through this method.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<DocumentSummary>, AppError> {
        let documents = sqlx::query_as::<Postgres, DocumentSummary>(
            r#"
            SELECT id, title, file_name, file_size, file_type, status, created_at
            FROM documents
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Fetch a single document, scoped to its owner
    #[tracing::instrument(
        skip(self),
        fields(db.table = "documents", db.operation = "select", db.record_id = %id)
    )]
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            SELECT id, user_id, title, file_name, file_size, file_type, file_path, status, metadata, created_at
            FROM documents
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Delete a document row, scoped to its owner. Returns true if a row was
    /// removed.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "documents", db.operation = "delete", db.record_id = %id)
    )]
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
