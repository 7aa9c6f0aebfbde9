use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::profile_dto::{RecruiterProfileUpsert, StudentProfileUpsert};
use crate::error::Result;
use crate::models::account::Account;
use crate::models::recruiter_profile::RecruiterProfile;
use crate::models::student_profile::StudentProfile;

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create-or-update keyed by the owning account; a profile is 1:1
    /// with its account.
    pub async fn upsert_student(
        &self,
        account: &Account,
        payload: StudentProfileUpsert,
    ) -> Result<StudentProfile> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"
            INSERT INTO student_profiles (
                account_id, first_name, last_name, email, phone, college, course,
                year_of_study, gpa, linkedin_url, github_url, portfolio_url, bio,
                career_goals, skills, interests, preferred_roles, preferred_locations
            ) VALUES (
                $1,$2,$3,$4,$5,$6,$7,
                $8,$9,$10,$11,$12,$13,
                $14,$15,$16,$17,$18
            )
            ON CONFLICT (account_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                college = EXCLUDED.college,
                course = EXCLUDED.course,
                year_of_study = EXCLUDED.year_of_study,
                gpa = EXCLUDED.gpa,
                linkedin_url = EXCLUDED.linkedin_url,
                github_url = EXCLUDED.github_url,
                portfolio_url = EXCLUDED.portfolio_url,
                bio = EXCLUDED.bio,
                career_goals = EXCLUDED.career_goals,
                skills = EXCLUDED.skills,
                interests = EXCLUDED.interests,
                preferred_roles = EXCLUDED.preferred_roles,
                preferred_locations = EXCLUDED.preferred_locations,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(account.id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&account.email)
        .bind(&payload.phone)
        .bind(&payload.college)
        .bind(&payload.course)
        .bind(&payload.year_of_study)
        .bind(&payload.gpa)
        .bind(&payload.linkedin_url)
        .bind(&payload.github_url)
        .bind(&payload.portfolio_url)
        .bind(&payload.bio)
        .bind(&payload.career_goals)
        .bind(&payload.skills)
        .bind(&payload.interests)
        .bind(&payload.preferred_roles)
        .bind(&payload.preferred_locations)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn upsert_recruiter(
        &self,
        account: &Account,
        payload: RecruiterProfileUpsert,
    ) -> Result<RecruiterProfile> {
        let profile = sqlx::query_as::<_, RecruiterProfile>(
            r#"
            INSERT INTO recruiter_profiles (
                account_id, first_name, last_name, email, phone, company,
                company_website, company_description
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (account_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                company = EXCLUDED.company,
                company_website = EXCLUDED.company_website,
                company_description = EXCLUDED.company_description,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(account.id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&account.email)
        .bind(&payload.phone)
        .bind(&payload.company)
        .bind(&payload.company_website)
        .bind(&payload.company_description)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Option<StudentProfile>> {
        let profile =
            sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    pub async fn get_student_by_id(&self, id: Uuid) -> Result<Option<StudentProfile>> {
        let profile =
            sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    pub async fn get_recruiter_by_email(&self, email: &str) -> Result<Option<RecruiterProfile>> {
        let profile = sqlx::query_as::<_, RecruiterProfile>(
            "SELECT * FROM recruiter_profiles WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn get_recruiter_by_id(&self, id: Uuid) -> Result<Option<RecruiterProfile>> {
        let profile =
            sqlx::query_as::<_, RecruiterProfile>("SELECT * FROM recruiter_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    pub async fn list_students(&self) -> Result<Vec<StudentProfile>> {
        let profiles = sqlx::query_as::<_, StudentProfile>(
            "SELECT * FROM student_profiles ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    pub async fn list_recruiters(&self) -> Result<Vec<RecruiterProfile>> {
        let profiles = sqlx::query_as::<_, RecruiterProfile>(
            "SELECT * FROM recruiter_profiles ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }
}
