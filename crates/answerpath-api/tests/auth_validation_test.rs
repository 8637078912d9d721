//! Authentication and upload validation tests.
//!
//! These paths reject before the first database query, so they run against a
//! lazy pool with no live Postgres behind it.

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{bearer, session_token, setup_test_app_without_db};

fn text_file_form(name: &str, data: Vec<u8>, content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data)
            .file_name(name.to_string())
            .mime_type(content_type.to_string()),
    )
}

#[tokio::test]
async fn test_list_documents_requires_auth() {
    let app = setup_test_app_without_db().await;

    let response = app.server.get("/api/documents").await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let app = setup_test_app_without_db().await;

    let form = text_file_form("notes.txt", b"hello".to_vec(), "text/plain");
    let response = app.server.post("/api/documents/upload").multipart(form).await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = setup_test_app_without_db().await;

    let response = app
        .server
        .get("/api/documents")
        .add_header("Authorization", "Bearer not-a-token")
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_disallowed_content_type_rejected() {
    let app = setup_test_app_without_db().await;
    let token = session_token("alice@example.com", Some("Alice"));

    let form = text_file_form("archive.zip", b"PK\x03\x04".to_vec(), "application/zip");
    let response = app
        .server
        .post("/api/documents/upload")
        .add_header("Authorization", bearer(&token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"],
        "Invalid file type. Only PDF, DOCX, XLSX, XLS, and TXT files are allowed."
    );

    // Rejected uploads must not leave blobs behind.
    let entries: Vec<_> = std::fs::read_dir(app.temp_dir.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_oversize_upload_rejected_with_400() {
    let app = setup_test_app_without_db().await;
    let token = session_token("alice@example.com", None);

    let data = vec![0u8; 10 * 1024 * 1024 + 1];
    let form = text_file_form("big.txt", data, "text/plain");
    let response = app
        .server
        .post("/api/documents/upload")
        .add_header("Authorization", bearer(&token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "File size exceeds 10MB limit.");
}

#[tokio::test]
async fn test_missing_file_field_rejected() {
    let app = setup_test_app_without_db().await;
    let token = session_token("alice@example.com", None);

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app
        .server
        .post("/api/documents/upload")
        .add_header("Authorization", bearer(&token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = setup_test_app_without_db().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}
