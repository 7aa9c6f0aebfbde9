use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::PostJobPayload;
use crate::error::{Error, Result};
use crate::models::job::{ApprovalStatus, Job};

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

/// Job row with the recruiter's company denormalized for listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobWithCompany {
    pub id: Uuid,
    pub recruiter_profile_id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub stipend: Option<rust_decimal::Decimal>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub question_for_applicant: Option<String>,
    pub admin_approval_status: String,
    pub company_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

const JOB_WITH_COMPANY_SELECT: &str = r#"
    SELECT j.id, j.recruiter_profile_id, j.title, j.department, j.location,
           j.job_type, j.stipend, j.duration, j.description, j.requirements,
           j.question_for_applicant, j.admin_approval_status,
           r.company AS company_name, j.created_at
    FROM jobs j
    JOIN recruiter_profiles r ON r.id = j.recruiter_profile_id
"#;

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new posting. The approval status is always PENDING here,
    /// whatever the caller sent.
    pub async fn create(
        &self,
        recruiter_profile_id: Uuid,
        payload: PostJobPayload,
    ) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                recruiter_profile_id, title, department, location, job_type,
                stipend, duration, description, requirements,
                question_for_applicant, admin_approval_status
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
            RETURNING *
            "#,
        )
        .bind(recruiter_profile_id)
        .bind(&payload.title)
        .bind(&payload.department)
        .bind(&payload.location)
        .bind(&payload.job_type)
        .bind(payload.stipend)
        .bind(&payload.duration)
        .bind(&payload.description)
        .bind(&payload.requirements)
        .bind(&payload.question_for_applicant)
        .bind(ApprovalStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn list_by_recruiter(&self, recruiter_profile_id: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE recruiter_profile_id = $1 ORDER BY created_at DESC",
        )
        .bind(recruiter_profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    /// Student-facing catalog: approved postings only.
    pub async fn list_approved(&self) -> Result<Vec<JobWithCompany>> {
        let query = format!(
            "{} WHERE j.admin_approval_status = $1 ORDER BY j.created_at DESC",
            JOB_WITH_COMPANY_SELECT
        );
        let jobs = sqlx::query_as::<_, JobWithCompany>(&query)
            .bind(ApprovalStatus::Approved.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    /// Admin view: every posting regardless of status.
    pub async fn list_all(&self) -> Result<Vec<JobWithCompany>> {
        let query = format!("{} ORDER BY j.created_at DESC", JOB_WITH_COMPANY_SELECT);
        let jobs = sqlx::query_as::<_, JobWithCompany>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn set_approval(&self, id: Uuid, status: ApprovalStatus) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET admin_approval_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        job.ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    /// Delete only when the caller's recruiter profile owns the job.
    pub async fn delete_owned(&self, id: Uuid, recruiter_profile_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND recruiter_profile_id = $2")
            .bind(id)
            .bind(recruiter_profile_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(
                "Job not found or not owned by you".to_string(),
            ));
        }
        Ok(())
    }
}
