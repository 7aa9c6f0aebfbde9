use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{ApplyRequest, UpdateStatusPayload},
    error::{Error, Result},
    middleware::auth::Claims,
    models::account::Role,
    models::application::ApplicationStatus,
    services::application_service::StatusActor,
    AppState,
};

#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ApplyRequest>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .get_student_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::BadRequest("Student profile not found".to_string()))?;

    let application = state.application_service.apply(profile.id, payload).await?;
    let response = state.application_service.project(application).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .get_student_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::BadRequest("Student profile not found".to_string()))?;

    let applications = state.application_service.list_by_student(profile.id).await?;
    let responses = state.application_service.project_all(applications).await?;
    Ok(Json(responses))
}

#[axum::debug_handler]
pub async fn applications_for_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let recruiter = state
        .profile_service
        .get_recruiter_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::Forbidden("Recruiter profile not found".to_string()))?;

    let job = state
        .job_service
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
    if job.recruiter_profile_id != recruiter.id {
        return Err(Error::Forbidden(
            "You did not post this job".to_string(),
        ));
    }

    let applications = state.application_service.list_by_job(job_id).await?;
    let responses = state.application_service.project_all(applications).await?;
    Ok(Json(responses))
}

#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let next: ApplicationStatus = payload.status.parse()?;

    let actor = if claims.has_role(Role::Admin) {
        StatusActor::Admin
    } else {
        let recruiter = state
            .profile_service
            .get_recruiter_by_email(claims.email())
            .await?
            .ok_or_else(|| Error::Forbidden("Recruiter profile not found".to_string()))?;
        StatusActor::Recruiter(recruiter.id)
    };

    let application = state
        .application_service
        .update_status(application_id, next, actor)
        .await?;
    let response = state.application_service.project(application).await?;
    Ok(Json(response))
}
