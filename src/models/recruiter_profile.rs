use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecruiterProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub company_website: Option<String>,
    pub company_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecruiterProfile {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim().to_string();
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }

    /// Core identity fields that must be populated before the recruiter
    /// may post jobs.
    pub fn missing_identity_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last_name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if !matches!(&self.phone, Some(p) if !p.trim().is_empty()) {
            missing.push("phone");
        }
        if !matches!(&self.company, Some(c) if !c.trim().is_empty()) {
            missing.push("company");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile() -> RecruiterProfile {
        RecruiterProfile {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            first_name: "Rhea".into(),
            last_name: "Kapoor".into(),
            email: "rhea@acme.example".into(),
            phone: Some("+1-555-0100".into()),
            company: Some("Acme".into()),
            company_website: None,
            company_description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn complete_profile_has_no_missing_fields() {
        assert!(profile().missing_identity_fields().is_empty());
    }

    #[test]
    fn blank_phone_and_company_are_reported() {
        let mut p = profile();
        p.phone = Some("   ".into());
        p.company = None;
        assert_eq!(p.missing_identity_fields(), vec!["phone", "company"]);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut p = profile();
        p.first_name = "".into();
        p.last_name = "".into();
        assert_eq!(p.display_name(), "rhea@acme.example");
    }
}
