use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use answerpath_core::models::{Document, DocumentStatus};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Document fields returned after a successful upload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub status: DocumentStatus,
}

impl From<Document> for UploadedDocument {
    fn from(doc: Document) -> Self {
        UploadedDocument {
            id: doc.id,
            file_name: doc.file_name,
            file_size: doc.file_size,
            file_type: doc.file_type,
            status: doc.status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub document: UploadedDocument,
}

#[utoipa::path(
    post,
    path = "/api/documents/upload",
    tag = "documents",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document uploaded successfully", body = UploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, identity, multipart),
    fields(user.email = %identity.email, operation = "upload_document")
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (data, file_name, content_type) = extract_multipart_file(multipart).await?;

    let document = state
        .uploads
        .handle_upload(&identity, &file_name, &content_type, data)
        .await?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        document: UploadedDocument::from(document),
    }))
}
