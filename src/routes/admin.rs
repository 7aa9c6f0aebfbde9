use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::document_dto::{DocumentResponse, ReviewDocumentPayload},
    dto::job_dto::{ApproveJobPayload, JobResponse, JobWithCompanyResponse},
    dto::profile_dto::{AdminProfilesResponse, RecruiterWithDocuments, StudentWithDocuments},
    error::Result,
    models::document::ReviewStatus,
    models::job::ApprovalStatus,
    AppState,
};

#[axum::debug_handler]
pub async fn list_all_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_all().await?;
    let jobs: Vec<JobWithCompanyResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(jobs))
}

#[axum::debug_handler]
pub async fn approve_or_reject_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<ApproveJobPayload>,
) -> Result<impl IntoResponse> {
    let status: ApprovalStatus = payload.status.parse()?;
    let job = state.job_service.set_approval(job_id, status).await?;
    Ok(Json(JobResponse::from(job)))
}

#[axum::debug_handler]
pub async fn review_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<ReviewDocumentPayload>,
) -> Result<impl IntoResponse> {
    let status: ReviewStatus = payload.status.parse()?;
    let document = state
        .document_service
        .update_status(document_id, status, payload.remarks)
        .await?;
    Ok(Json(DocumentResponse::from(document)))
}

#[axum::debug_handler]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.document_service.delete(document_id, None).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cross-section of every profile with its documents, for the admin
/// review screens.
#[axum::debug_handler]
pub async fn list_profiles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let mut students = Vec::new();
    for profile in state.profile_service.list_students().await? {
        let documents = state.document_service.list_by_profile(profile.id).await?;
        students.push(StudentWithDocuments { profile, documents });
    }

    let mut recruiters = Vec::new();
    for profile in state.profile_service.list_recruiters().await? {
        let documents = state.document_service.list_by_profile(profile.id).await?;
        recruiters.push(RecruiterWithDocuments { profile, documents });
    }

    Ok(Json(AdminProfilesResponse {
        students,
        recruiters,
    }))
}
