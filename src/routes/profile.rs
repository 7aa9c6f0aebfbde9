use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{RecruiterProfileUpsert, StudentProfileUpsert},
    error::{Error, Result},
    middleware::auth::Claims,
    models::account::Account,
    AppState,
};

async fn require_account(state: &AppState, claims: &Claims) -> Result<Account> {
    state
        .user_service
        .get_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::Unauthorized("Account not found".to_string()))
}

#[axum::debug_handler]
pub async fn upsert_student_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<StudentProfileUpsert>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = require_account(&state, &claims).await?;
    let profile = state.profile_service.upsert_student(&account, payload).await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn get_student_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .get_student_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::NotFound("Student profile not found".to_string()))?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn upsert_recruiter_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RecruiterProfileUpsert>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = require_account(&state, &claims).await?;
    let profile = state
        .profile_service
        .upsert_recruiter(&account, payload)
        .await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn get_recruiter_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .get_recruiter_by_email(claims.email())
        .await?
        .ok_or_else(|| Error::NotFound("Recruiter profile not found".to_string()))?;
    Ok(Json(profile))
}
