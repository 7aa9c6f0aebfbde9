use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub student_profile_id: Uuid,
    pub job_id: Uuid,
    pub resume_document_id: Option<Uuid>,
    pub marksheet_document_id: Option<Uuid>,
    pub certificate_ids: Vec<Uuid>,
    pub status: String,
    pub answer_for_recruiter: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Review lifecycle of an application. APPLIED is the only initial
/// state; ACCEPTED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Applied, Reviewed) | (Applied, Accepted) | (Applied, Rejected)
                | (Reviewed, Accepted)
                | (Reviewed, Rejected)
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "APPLIED" => Ok(ApplicationStatus::Applied),
            "REVIEWED" => Ok(ApplicationStatus::Reviewed),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            other => Err(Error::BadRequest(format!(
                "Unknown application status: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::*;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn applied_can_reach_every_review_outcome() {
        assert!(Applied.can_transition_to(Reviewed));
        assert!(Applied.can_transition_to(Accepted));
        assert!(Applied.can_transition_to(Rejected));
    }

    #[test]
    fn reviewed_can_only_be_decided() {
        assert!(Reviewed.can_transition_to(Accepted));
        assert!(Reviewed.can_transition_to(Rejected));
        assert!(!Reviewed.can_transition_to(Applied));
    }

    #[test]
    fn terminal_states_do_not_move() {
        for terminal in [Accepted, Rejected] {
            for next in [Applied, Reviewed, Accepted, Rejected] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn out_of_set_status_is_invalid_input() {
        assert!(ApplicationStatus::from_str("SHORTLISTED").is_err());
        assert_eq!(
            ApplicationStatus::from_str("accepted").unwrap(),
            Accepted
        );
    }
}
