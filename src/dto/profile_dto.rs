use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::document::Document;
use crate::models::recruiter_profile::RecruiterProfile;
use crate::models::student_profile::StudentProfile;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentProfileUpsert {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
    pub gpa: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub career_goals: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferred_roles: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecruiterProfileUpsert {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub company_website: Option<String>,
    pub company_description: Option<String>,
}

/// Admin cross-section: every profile with its uploaded documents.
#[derive(Debug, Clone, Serialize)]
pub struct AdminProfilesResponse {
    pub students: Vec<StudentWithDocuments>,
    pub recruiters: Vec<RecruiterWithDocuments>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentWithDocuments {
    #[serde(flatten)]
    pub profile: StudentProfile,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecruiterWithDocuments {
    #[serde(flatten)]
    pub profile: RecruiterProfile,
    pub documents: Vec<Document>,
}
