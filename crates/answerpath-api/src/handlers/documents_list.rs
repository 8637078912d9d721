use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use answerpath_core::models::DocumentSummary;
use answerpath_core::AppError;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "documents",
    responses(
        (status = 200, description = "The caller's documents, newest first", body = DocumentListResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, identity),
    fields(user.email = %identity.email, operation = "list_documents")
)]
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
) -> Result<Json<DocumentListResponse>, HttpAppError> {
    // Listing never creates the user; an authenticated caller who has not
    // uploaded anything yet gets a 404, not an empty list.
    let user = state
        .users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let documents = state.documents.list_by_user(user.id).await?;

    Ok(Json(DocumentListResponse { documents }))
}
