use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{JobResponse, JobWithCompanyResponse, PostJobPayload},
    error::{Error, Result},
    middleware::auth::Claims,
    models::recruiter_profile::RecruiterProfile,
    AppState,
};

async fn require_recruiter_profile(state: &AppState, claims: &Claims) -> Result<RecruiterProfile> {
    state
        .profile_service
        .get_recruiter_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::BadRequest("Recruiter profile not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/recruiter/jobs",
    request_body = PostJobPayload,
    responses(
        (status = 201, description = "Job posted, pending admin approval"),
        (status = 400, description = "Profile incomplete or compliance documents missing")
    )
)]
#[axum::debug_handler]
pub async fn post_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PostJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter = require_recruiter_profile(&state, &claims).await?;

    let missing_fields = recruiter.missing_identity_fields();
    if !missing_fields.is_empty() {
        return Err(Error::BadRequest(format!(
            "Please complete your profile before posting a job (missing: {})",
            missing_fields.join(", ")
        )));
    }

    let missing_docs = state
        .document_service
        .missing_compliance_types(recruiter.id)
        .await?;
    if !missing_docs.is_empty() {
        let names: Vec<&str> = missing_docs.iter().map(|d| d.as_str()).collect();
        return Err(Error::BadRequest(format!(
            "All required documents must be approved before posting a job (missing: {})",
            names.join(", ")
        )));
    }

    let job = state.job_service.create(recruiter.id, payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/recruiter/jobs",
    responses(
        (status = 200, description = "Jobs posted by the calling recruiter")
    )
)]
#[axum::debug_handler]
pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let recruiter = require_recruiter_profile(&state, &claims).await?;
    let jobs = state.job_service.list_by_recruiter(recruiter.id).await?;
    let jobs: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(jobs))
}

#[utoipa::path(
    delete,
    path = "/api/recruiter/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found or not owned by the caller")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let recruiter = require_recruiter_profile(&state, &claims).await?;
    state.job_service.delete_owned(id, recruiter.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Approved jobs with company names")
    )
)]
#[axum::debug_handler]
pub async fn list_approved_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_approved().await?;
    let jobs: Vec<JobWithCompanyResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(jobs))
}
