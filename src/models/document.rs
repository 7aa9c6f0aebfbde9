use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub owner_role: String,
    pub doc_type: String,
    pub display_name: String,
    pub storage_url: String,
    pub file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub status: String,
    pub remarks: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    ProfilePicture,
    Resume,
    Marksheet,
    IdentityProof,
    Certificate,
    Registration,
    TaxId,
    BusinessProof,
    Incorporation,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ProfilePicture => "profile_picture",
            DocumentType::Resume => "resume",
            DocumentType::Marksheet => "marksheet",
            DocumentType::IdentityProof => "identity_proof",
            DocumentType::Certificate => "certificate",
            DocumentType::Registration => "registration",
            DocumentType::TaxId => "tax_id",
            DocumentType::BusinessProof => "business_proof",
            DocumentType::Incorporation => "incorporation",
        }
    }

    /// Document types a recruiter must have approved before posting jobs.
    pub const REQUIRED_COMPLIANCE: [DocumentType; 4] = [
        DocumentType::Registration,
        DocumentType::TaxId,
        DocumentType::BusinessProof,
        DocumentType::Incorporation,
    ];

    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile_picture" => Ok(DocumentType::ProfilePicture),
            "resume" => Ok(DocumentType::Resume),
            "marksheet" => Ok(DocumentType::Marksheet),
            "identity_proof" => Ok(DocumentType::IdentityProof),
            "certificate" => Ok(DocumentType::Certificate),
            "registration" => Ok(DocumentType::Registration),
            "tax_id" => Ok(DocumentType::TaxId),
            "business_proof" => Ok(DocumentType::BusinessProof),
            "incorporation" => Ok(DocumentType::Incorporation),
            other => Err(Error::BadRequest(format!(
                "Unknown document type: {}",
                other
            ))),
        }
    }
}

/// Admin review status for an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReviewStatus::Pending),
            "APPROVED" => Ok(ReviewStatus::Approved),
            "REJECTED" => Ok(ReviewStatus::Rejected),
            other => Err(Error::BadRequest(format!(
                "Unknown document status: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn doc_type_round_trips() {
        for ty in [
            DocumentType::Resume,
            DocumentType::TaxId,
            DocumentType::BusinessProof,
        ] {
            assert_eq!(DocumentType::from_str(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(ReviewStatus::from_str("SHORTLISTED").is_err());
    }

    #[test]
    fn display_name_is_uppercased() {
        assert_eq!(DocumentType::IdentityProof.display_name(), "IDENTITY PROOF");
    }
}
