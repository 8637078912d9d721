//! End-to-end document flow tests against a containerized Postgres.

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{bearer, session_token, setup_test_app, TestApp};

fn upload_form(name: &str, data: Vec<u8>, content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data)
            .file_name(name.to_string())
            .mime_type(content_type.to_string()),
    )
}

async fn upload(app: &TestApp, token: &str, name: &str, data: &[u8], content_type: &str) -> serde_json::Value {
    let response = app
        .server
        .post("/api/documents/upload")
        .add_header("Authorization", bearer(token))
        .multipart(upload_form(name, data.to_vec(), content_type))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    response.json()
}

#[tokio::test]
async fn test_upload_text_document() {
    let app = setup_test_app().await;
    let token = session_token("alice@example.com", Some("Alice"));

    let body = upload(&app, &token, "notes.txt", b"some text", "text/plain").await;

    assert_eq!(body["message"], "File uploaded successfully");
    let document = &body["document"];
    assert!(document["id"].is_string());
    assert_eq!(document["fileName"], "notes.txt");
    assert_eq!(document["fileSize"], 9);
    assert_eq!(document["fileType"], "text/plain");
    assert_eq!(document["status"], "processed");
    // Locator and metadata stay server-side.
    assert!(document.get("filePath").is_none());
    assert!(document.get("metadata").is_none());

    // The blob landed in the upload dir under a locator-style name.
    let entries: Vec<_> = std::fs::read_dir(app.temp_dir.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    let file_name = entries[0].file_name().to_string_lossy().to_string();
    assert!(file_name.ends_with(".txt"));
    assert_ne!(file_name, "notes.txt");
}

#[tokio::test]
async fn test_list_documents_newest_first() {
    let app = setup_test_app().await;
    let token = session_token("alice@example.com", None);

    upload(&app, &token, "first.txt", b"one", "text/plain").await;
    upload(&app, &token, "second.txt", b"two", "text/plain").await;
    upload(&app, &token, "third.pdf", b"%PDF-1.4", "application/pdf").await;

    let response = app
        .server
        .get("/api/documents")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0]["fileName"], "third.pdf");
    assert_eq!(documents[1]["fileName"], "second.txt");
    assert_eq!(documents[2]["fileName"], "first.txt");
    for doc in documents {
        assert_eq!(doc["status"], "processed");
        assert!(doc.get("filePath").is_none());
    }
}

#[tokio::test]
async fn test_list_documents_isolated_per_user() {
    let app = setup_test_app().await;
    let alice = session_token("alice@example.com", None);
    let bob = session_token("bob@example.com", None);

    upload(&app, &alice, "alice.txt", b"hers", "text/plain").await;
    upload(&app, &bob, "bob.txt", b"his", "text/plain").await;

    let response = app
        .server
        .get("/api/documents")
        .add_header("Authorization", bearer(&bob))
        .await;
    let body: serde_json::Value = response.json();
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["fileName"], "bob.txt");
}

#[tokio::test]
async fn test_list_before_first_upload_is_404() {
    let app = setup_test_app().await;
    let token = session_token("newcomer@example.com", None);

    let response = app
        .server
        .get("/api/documents")
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_repeat_uploads_reuse_user_row() {
    let app = setup_test_app().await;

    // Same email with different display names across sessions.
    let first = session_token("carol@example.com", Some("Carol"));
    upload(&app, &first, "a.txt", b"a", "text/plain").await;

    let second = session_token("carol@example.com", Some("Caroline"));
    upload(&app, &second, "b.txt", b"b", "text/plain").await;

    let users: Vec<(String, Option<String>)> =
        sqlx::query_as("SELECT email, name FROM users WHERE email = $1")
            .bind("carol@example.com")
            .fetch_all(&app.pool)
            .await
            .unwrap();

    assert_eq!(users.len(), 1);
    // The name captured at first sight sticks; later sessions do not refresh it.
    assert_eq!(users[0].1.as_deref(), Some("Carol"));
}

#[tokio::test]
async fn test_download_round_trip() {
    let app = setup_test_app().await;
    let token = session_token("alice@example.com", None);

    let body = upload(&app, &token, "report.pdf", b"%PDF-1.4 fake", "application/pdf").await;
    let id = body["document"]["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .get(&format!("/api/documents/{}/download", id))
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.4 fake");
}

#[tokio::test]
async fn test_download_other_users_document_is_404() {
    let app = setup_test_app().await;
    let alice = session_token("alice@example.com", None);
    let bob = session_token("bob@example.com", None);

    let body = upload(&app, &alice, "secret.txt", b"private", "text/plain").await;
    let id = body["document"]["id"].as_str().unwrap().to_string();

    // Bob needs a user row to get past the user lookup.
    upload(&app, &bob, "bob.txt", b"his", "text/plain").await;

    let response = app
        .server
        .get(&format!("/api/documents/{}/download", id))
        .add_header("Authorization", bearer(&bob))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_document_removes_row_and_blob() {
    let app = setup_test_app().await;
    let token = session_token("alice@example.com", None);

    let body = upload(&app, &token, "gone.txt", b"bytes", "text/plain").await;
    let id = body["document"]["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .delete(&format!("/api/documents/{}", id))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 204);

    // Row gone
    let list = app
        .server
        .get("/api/documents")
        .add_header("Authorization", bearer(&token))
        .await;
    let list_body: serde_json::Value = list.json();
    assert!(list_body["documents"].as_array().unwrap().is_empty());

    // Blob gone
    let entries: Vec<_> = std::fs::read_dir(app.temp_dir.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());

    // Deleting again is 404, not 500
    let again = app
        .server
        .delete(&format!("/api/documents/{}", id))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(again.status_code(), 404);
}

#[tokio::test]
async fn test_delete_survives_missing_blob() {
    let app = setup_test_app().await;
    let token = session_token("alice@example.com", None);

    let body = upload(&app, &token, "orphan.txt", b"bytes", "text/plain").await;
    let id = body["document"]["id"].as_str().unwrap().to_string();

    // Simulate a blob lost out-of-band.
    for entry in std::fs::read_dir(app.temp_dir.path()).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let response = app
        .server
        .delete(&format!("/api/documents/{}", id))
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), 204);
}

#[tokio::test]
async fn test_delete_unknown_document_is_404() {
    let app = setup_test_app().await;
    let token = session_token("alice@example.com", None);
    upload(&app, &token, "a.txt", b"a", "text/plain").await;

    let response = app
        .server
        .delete(&format!("/api/documents/{}", uuid::Uuid::new_v4()))
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_readiness_reports_database() {
    let app = setup_test_app().await;

    let response = app.server.get("/health/ready").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "ready");
}
