use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use answerpath_core::AppError;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response},
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/documents/{id}/download",
    tag = "documents",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document file", content_type = "application/octet-stream"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, identity),
    fields(user.email = %identity.email, document_id = %id, operation = "download_document")
)]
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Response<Body>, HttpAppError> {
    let user = state
        .users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Ownership is enforced in the query; another user's document id reads as absent.
    let document = state
        .documents
        .get_for_user(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let data = state.storage.get(&document.file_path).await?;

    let content_disposition = format!("attachment; filename=\"{}\"", document.file_name);

    let response = Response::builder()
        .header(header::CONTENT_TYPE, document.file_type)
        .header(header::CONTENT_DISPOSITION, content_disposition)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
