use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use answerpath_core::AppError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "documents",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 204, description = "Document deleted successfully"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, identity),
    fields(user.email = %identity.email, document_id = %id, operation = "delete_document")
)]
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let user = state
        .users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let document = state
        .documents
        .get_for_user(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    // Blob first, then row. The blob delete is idempotent, so a retry after a
    // partial failure converges instead of erroring on the missing file.
    state.storage.delete(&document.file_path).await?;

    let removed = state.documents.delete(id, user.id).await?;
    if !removed {
        return Err(AppError::NotFound("Document not found".to_string()).into());
    }

    tracing::info!(document_id = %id, user_id = %user.id, "Document deleted");

    Ok(StatusCode::NO_CONTENT)
}
