use bytes::Bytes;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::account::Role;
use crate::models::document::{Document, DocumentType, ReviewStatus};
use crate::services::storage_service::{StorageClient, StorageKind};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Content-type and size policy per document type. Pictures are
/// image-only and capped at 5 MB; resumes are PDF-only; everything else
/// accepts PDF or image up to 10 MB.
pub fn validate_upload(doc_type: DocumentType, content_type: &str, size: usize) -> Result<()> {
    let (type_ok, max_bytes) = match doc_type {
        DocumentType::ProfilePicture => (content_type.starts_with("image/"), MAX_IMAGE_BYTES),
        DocumentType::Resume => (content_type == "application/pdf", MAX_DOCUMENT_BYTES),
        _ => (
            content_type == "application/pdf" || content_type.starts_with("image/"),
            MAX_DOCUMENT_BYTES,
        ),
    };

    if !type_ok {
        return Err(Error::BadRequest(format!(
            "Content type {} is not allowed for {}",
            content_type, doc_type
        )));
    }
    if size == 0 {
        return Err(Error::BadRequest("Uploaded file is empty".to_string()));
    }
    if size > max_bytes {
        return Err(Error::BadRequest(format!(
            "File exceeds the {} MB limit for {}",
            max_bytes / (1024 * 1024),
            doc_type
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct DocumentService {
    pool: PgPool,
    storage: StorageClient,
}

impl DocumentService {
    pub fn new(pool: PgPool, storage: StorageClient) -> Self {
        Self { pool, storage }
    }

    pub async fn upload(
        &self,
        profile_id: Uuid,
        owner_role: Role,
        doc_type: DocumentType,
        display_name: Option<String>,
        file: UploadedFile,
    ) -> Result<Document> {
        validate_upload(doc_type, &file.content_type, file.data.len())?;

        let kind = StorageKind::for_content_type(&file.content_type);
        let storage_url = self
            .storage
            .upload(&file.file_name, &file.content_type, file.data.clone(), kind)
            .await?;

        let display_name = display_name.unwrap_or_else(|| doc_type.display_name());
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                profile_id, owner_role, doc_type, display_name, storage_url,
                file_name, file_size, content_type, status
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(owner_role.as_str())
        .bind(doc_type.as_str())
        .bind(&display_name)
        .bind(&storage_url)
        .bind(&file.file_name)
        .bind(file.data.len() as i64)
        .bind(&file.content_type)
        .bind(ReviewStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn list_by_profile(&self, profile_id: Uuid) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE profile_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn list_by_profile_and_type(
        &self,
        profile_id: Uuid,
        doc_type: DocumentType,
    ) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE profile_id = $1 AND doc_type = $2 ORDER BY uploaded_at DESC",
        )
        .bind(profile_id)
        .bind(doc_type.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Document>> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(document)
    }

    /// Admin review decision.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        remarks: Option<String>,
    ) -> Result<Document> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET status = $2, remarks = COALESCE($3, remarks)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(&remarks)
        .fetch_optional(&self.pool)
        .await?;
        document.ok_or_else(|| Error::NotFound("Document not found".to_string()))
    }

    /// Remove a document and its stored bytes. Non-admin callers must
    /// own the document through their profile.
    pub async fn delete(&self, id: Uuid, caller_profile_id: Option<Uuid>) -> Result<()> {
        let document = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Document not found".to_string()))?;

        if let Some(profile_id) = caller_profile_id {
            if document.profile_id != profile_id {
                return Err(Error::NotFound("Document not found".to_string()));
            }
        }

        let kind = StorageKind::for_content_type(&document.content_type);
        self.storage.delete(&document.storage_url, kind).await?;

        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn has_approved(&self, profile_id: Uuid, doc_type: DocumentType) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE profile_id = $1 AND doc_type = $2 AND status = $3",
        )
        .bind(profile_id)
        .bind(doc_type.as_str())
        .bind(ReviewStatus::Approved.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Compliance types still missing an approved document for this
    /// profile; empty means the recruiter may post jobs.
    pub async fn missing_compliance_types(&self, profile_id: Uuid) -> Result<Vec<DocumentType>> {
        let mut missing = Vec::new();
        for doc_type in DocumentType::REQUIRED_COMPLIANCE {
            if !self.has_approved(profile_id, doc_type).await? {
                missing.push(doc_type);
            }
        }
        Ok(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_must_be_an_image_under_5mb() {
        assert!(validate_upload(DocumentType::ProfilePicture, "image/png", 1024).is_ok());
        assert!(validate_upload(DocumentType::ProfilePicture, "application/pdf", 1024).is_err());
        assert!(
            validate_upload(DocumentType::ProfilePicture, "image/png", MAX_IMAGE_BYTES + 1)
                .is_err()
        );
    }

    #[test]
    fn resume_is_pdf_only() {
        assert!(validate_upload(DocumentType::Resume, "application/pdf", 1024).is_ok());
        assert!(validate_upload(DocumentType::Resume, "image/jpeg", 1024).is_err());
    }

    #[test]
    fn general_documents_accept_pdf_or_image_under_10mb() {
        for ty in [
            DocumentType::Marksheet,
            DocumentType::IdentityProof,
            DocumentType::Certificate,
            DocumentType::Registration,
        ] {
            assert!(validate_upload(ty, "application/pdf", 1024).is_ok());
            assert!(validate_upload(ty, "image/jpeg", 1024).is_ok());
            assert!(validate_upload(ty, "text/plain", 1024).is_err());
            assert!(validate_upload(ty, "application/pdf", MAX_DOCUMENT_BYTES + 1).is_err());
        }
    }

    #[test]
    fn empty_files_are_rejected() {
        assert!(validate_upload(DocumentType::Resume, "application/pdf", 0).is_err());
    }
}
