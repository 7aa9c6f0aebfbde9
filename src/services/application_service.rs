use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{ApplicationResponse, ApplyRequest, DocumentInfo};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::document::Document;
use crate::models::job::Job;
use crate::models::student_profile::StudentProfile;

/// Who is asking for a status change. Admins bypass the ownership
/// check; recruiters must own the application's job.
#[derive(Debug, Clone, Copy)]
pub enum StatusActor {
    Admin,
    Recruiter(Uuid),
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an application binding the student profile, the job and
    /// the selected documents. Every supplied document id must resolve
    /// to a document owned by the applying profile. Re-applying to the
    /// same job is allowed and creates a new row.
    pub async fn apply(
        &self,
        student_profile_id: Uuid,
        request: ApplyRequest,
    ) -> Result<Application> {
        let job_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1")
            .bind(request.job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job_exists.is_none() {
            return Err(Error::NotFound("Job not found".to_string()));
        }

        let mut referenced = Vec::new();
        referenced.extend(request.resume_id);
        referenced.extend(request.marksheet_id);
        referenced.extend(request.certificate_ids.iter().copied());
        for doc_id in &referenced {
            self.require_owned_document(*doc_id, student_profile_id)
                .await?;
        }

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (
                student_profile_id, job_id, resume_document_id,
                marksheet_document_id, certificate_ids, status, answer_for_recruiter
            ) VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING *
            "#,
        )
        .bind(student_profile_id)
        .bind(request.job_id)
        .bind(request.resume_id)
        .bind(request.marksheet_id)
        .bind(&request.certificate_ids)
        .bind(ApplicationStatus::Applied.as_str())
        .bind(&request.answer_for_recruiter)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    async fn require_owned_document(&self, doc_id: Uuid, profile_id: Uuid) -> Result<()> {
        let owned: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM documents WHERE id = $1 AND profile_id = $2")
                .bind(doc_id)
                .bind(profile_id)
                .fetch_optional(&self.pool)
                .await?;
        if owned.is_none() {
            return Err(Error::BadRequest(format!(
                "Document {} does not belong to your profile",
                doc_id
            )));
        }
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(application)
    }

    pub async fn list_by_student(&self, student_profile_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE student_profile_id = $1 ORDER BY applied_at DESC",
        )
        .bind(student_profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    pub async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE job_id = $1 ORDER BY applied_at DESC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Move an application through its review lifecycle. The caller
    /// must be an admin or the recruiter owning the application's job,
    /// and the transition must be legal for the current status.
    pub async fn update_status(
        &self,
        application_id: Uuid,
        next: ApplicationStatus,
        actor: StatusActor,
    ) -> Result<Application> {
        let application = self
            .get_by_id(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        if let StatusActor::Recruiter(recruiter_profile_id) = actor {
            let owner: Option<Uuid> = sqlx::query_scalar(
                "SELECT recruiter_profile_id FROM jobs WHERE id = $1",
            )
            .bind(application.job_id)
            .fetch_optional(&self.pool)
            .await?;
            if owner != Some(recruiter_profile_id) {
                return Err(Error::Forbidden(
                    "Only the recruiter who posted the job may update this application"
                        .to_string(),
                ));
            }
        }

        let current: ApplicationStatus = application.status.parse()?;
        if !current.can_transition_to(next) {
            return Err(Error::BadRequest(format!(
                "Cannot move application from {} to {}",
                current, next
            )));
        }

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(next.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    /// Denormalize one application into the caller-facing view: student
    /// identity and skills, resolved document info, and the job's
    /// question with the student's answer.
    pub async fn project(&self, application: Application) -> Result<ApplicationResponse> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            "SELECT * FROM student_profiles WHERE id = $1",
        )
        .bind(application.student_profile_id)
        .fetch_one(&self.pool)
        .await?;

        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(application.job_id)
            .fetch_one(&self.pool)
            .await?;

        let mut doc_ids: Vec<Uuid> = Vec::new();
        doc_ids.extend(application.resume_document_id);
        doc_ids.extend(application.marksheet_document_id);
        doc_ids.extend(application.certificate_ids.iter().copied());

        let documents = if doc_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ANY($1)")
                .bind(&doc_ids)
                .fetch_all(&self.pool)
                .await?
        };
        let doc_info = |id: Uuid| -> Option<DocumentInfo> {
            documents
                .iter()
                .find(|d| d.id == id)
                .map(DocumentInfo::from)
        };

        let resume = application.resume_document_id.and_then(doc_info);
        let marksheet = application.marksheet_document_id.and_then(doc_info);
        let certificates = application
            .certificate_ids
            .iter()
            .filter_map(|id| doc_info(*id))
            .collect();

        Ok(ApplicationResponse {
            id: application.id,
            job_id: job.id,
            job_title: job.title,
            student_profile_id: profile.id,
            student_name: profile.display_name(),
            student_email: profile.email,
            college: profile.college,
            course: profile.course,
            year_of_study: profile.year_of_study,
            skills: profile.skills,
            resume,
            marksheet,
            certificates,
            status: application.status,
            applied_at: application.applied_at,
            question_for_applicant: job.question_for_applicant,
            answer_for_recruiter: application.answer_for_recruiter,
        })
    }

    pub async fn project_all(
        &self,
        applications: Vec<Application>,
    ) -> Result<Vec<ApplicationResponse>> {
        let mut responses = Vec::with_capacity(applications.len());
        for application in applications {
            responses.push(self.project(application).await?);
        }
        Ok(responses)
    }
}
