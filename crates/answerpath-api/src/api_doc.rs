//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use answerpath_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AnswerPath API",
        version = "0.1.0",
        description = "Document upload and management API. Authenticated users upload PDF, Word, Excel, and plain-text documents and list, download, or delete them."
    ),
    paths(
        handlers::documents_list::list_documents,
        handlers::document_upload::upload_document,
        handlers::document_download::download_document,
        handlers::document_delete::delete_document,
    ),
    components(schemas(
        models::DocumentSummary,
        models::DocumentStatus,
        handlers::documents_list::DocumentListResponse,
        handlers::document_upload::UploadResponse,
        handlers::document_upload::UploadedDocument,
        error::ErrorResponse,
    )),
    tags(
        (name = "documents", description = "Document upload and management")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
