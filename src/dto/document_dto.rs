use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub doc_type: String,
    pub display_name: String,
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub status: String,
    pub remarks: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(value: Document) -> Self {
        Self {
            id: value.id,
            doc_type: value.doc_type,
            display_name: value.display_name,
            url: value.storage_url,
            file_name: value.file_name,
            file_size: value.file_size,
            content_type: value.content_type,
            status: value.status,
            remarks: value.remarks,
            uploaded_at: value.uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
}

/// Admin review decision on a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDocumentPayload {
    pub status: String,
    pub remarks: Option<String>,
}
