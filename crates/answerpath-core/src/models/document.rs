use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

/// Document processing status.
///
/// Transitions only forward: `processing` at creation, `processed` once the
/// pipeline finishes. There is no failure state; a row stuck in `processing`
/// means the process died between the insert and the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "document_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Processed,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Processed => write!(f, "processed"),
        }
    }
}

/// Document metadata record.
///
/// `file_path` is the opaque storage locator, set once at creation and never
/// exposed outside the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub file_path: String,
    pub status: DocumentStatus,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// Free-form metadata stored alongside a document (JSONB column).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Externally visible subset of a document's fields.
///
/// The storage locator and the raw metadata blob never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: Uuid,
    pub title: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentSummary {
    fn from(doc: Document) -> Self {
        DocumentSummary {
            id: doc.id,
            title: doc.title,
            file_name: doc.file_name,
            file_size: doc.file_size,
            file_type: doc.file_type,
            status: doc.status,
            created_at: doc.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_document() -> Document {
        Document {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "notes.txt".to_string(),
            file_name: "notes.txt".to_string(),
            file_size: 5,
            file_type: "text/plain".to_string(),
            file_path: "1700000000000-abcd1234.txt".to_string(),
            status: DocumentStatus::Processed,
            metadata: serde_json::json!({
                "originalName": "notes.txt",
                "uploadedAt": "2026-01-01T00:00:00Z",
            }),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_excludes_locator_and_metadata() {
        let summary = DocumentSummary::from(test_document());
        let json = serde_json::to_value(&summary).expect("serialize");

        assert!(json.get("filePath").is_none());
        assert!(json.get("metadata").is_none());
        assert_eq!(
            json.get("fileName").and_then(|v| v.as_str()),
            Some("notes.txt")
        );
        assert_eq!(json.get("fileSize").and_then(|v| v.as_i64()), Some(5));
        assert_eq!(
            json.get("status").and_then(|v| v.as_str()),
            Some("processed")
        );
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Processing).unwrap(),
            "\"processing\""
        );
        let status: DocumentStatus = serde_json::from_str("\"processed\"").unwrap();
        assert_eq!(status, DocumentStatus::Processed);
    }

    #[test]
    fn test_document_metadata_shape() {
        let meta = DocumentMetadata {
            original_name: "report.pdf".to_string(),
            uploaded_at: Utc::now(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("originalName").is_some());
        assert!(json.get("uploadedAt").is_some());
    }
}
