use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Job;
use crate::services::job_service::JobWithCompany;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub stipend: Option<Decimal>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub question_for_applicant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub recruiter_profile_id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub stipend: Option<Decimal>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub question_for_applicant: Option<String>,
    pub admin_approval_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            recruiter_profile_id: value.recruiter_profile_id,
            title: value.title,
            department: value.department,
            location: value.location,
            job_type: value.job_type,
            stipend: value.stipend,
            duration: value.duration,
            description: value.description,
            requirements: value.requirements,
            question_for_applicant: value.question_for_applicant,
            admin_approval_status: value.admin_approval_status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Listing entry with the posting company denormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobWithCompanyResponse {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub stipend: Option<Decimal>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub question_for_applicant: Option<String>,
    pub admin_approval_status: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<JobWithCompany> for JobWithCompanyResponse {
    fn from(value: JobWithCompany) -> Self {
        Self {
            id: value.id,
            title: value.title,
            department: value.department,
            location: value.location,
            job_type: value.job_type,
            stipend: value.stipend,
            duration: value.duration,
            description: value.description,
            requirements: value.requirements,
            question_for_applicant: value.question_for_applicant,
            admin_approval_status: value.admin_approval_status,
            company_name: value.company_name,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveJobPayload {
    /// APPROVED or REJECTED; anything else is invalid input.
    pub status: String,
}
