use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::message_dto::SendMessageRequest,
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent; response carries plaintext"),
        (status = 403, description = "Caller is not a party to the application")
    )
)]
#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let message = state
        .message_service
        .send(payload.application_id, claims.email(), &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/messages/{application_id}",
    params(
        ("application_id" = Uuid, Path, description = "Application thread")
    ),
    responses(
        (status = 200, description = "Thread messages, oldest first"),
        (status = 403, description = "Caller is not a party to the application")
    )
)]
#[axum::debug_handler]
pub async fn thread_for_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let messages = state
        .message_service
        .list_for_application(application_id, claims.email())
        .await?;
    Ok(Json(messages))
}
