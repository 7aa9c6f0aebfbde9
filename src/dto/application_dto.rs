use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub job_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub marksheet_id: Option<Uuid>,
    #[serde(default)]
    pub certificate_ids: Vec<Uuid>,
    pub answer_for_recruiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub status: String,
}

impl From<&Document> for DocumentInfo {
    fn from(value: &Document) -> Self {
        Self {
            id: value.id,
            name: value.display_name.clone(),
            url: value.storage_url.clone(),
            status: value.status.clone(),
        }
    }
}

/// Caller-facing application view with the student identity, resolved
/// documents and the job's question/answer pair denormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub student_profile_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub college: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
    pub skills: Vec<String>,
    pub resume: Option<DocumentInfo>,
    pub marksheet: Option<DocumentInfo>,
    pub certificates: Vec<DocumentInfo>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub question_for_applicant: Option<String>,
    pub answer_for_recruiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    /// One of the closed application statuses; out-of-set values are
    /// rejected.
    pub status: String,
}
