use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::document_dto::{DocumentListResponse, DocumentResponse},
    error::{Error, Result},
    middleware::auth::Claims,
    models::account::Role,
    models::document::DocumentType,
    services::document_service::UploadedFile,
    AppState,
};

/// The profile that owns documents for this caller, student or
/// recruiter depending on the token role.
async fn resolve_owner(state: &AppState, claims: &Claims) -> Result<(Uuid, Role)> {
    let role: Role = claims
        .role
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| Error::Forbidden("Role does not own documents".to_string()))?;
    match role {
        Role::Student => {
            let profile = state
                .profile_service
                .get_student_by_email(claims.email())
                .await?
                .ok_or_else(|| Error::BadRequest("Student profile not found".to_string()))?;
            Ok((profile.id, role))
        }
        Role::Recruiter => {
            let profile = state
                .profile_service
                .get_recruiter_by_email(claims.email())
                .await?
                .ok_or_else(|| Error::BadRequest("Recruiter profile not found".to_string()))?;
            Ok((profile.id, role))
        }
        Role::Admin => Err(Error::Forbidden(
            "Admins do not own uploaded documents".to_string(),
        )),
    }
}

#[axum::debug_handler]
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (profile_id, owner_role) = resolve_owner(&state, &claims).await?;

    let mut doc_type: Option<DocumentType> = None;
    let mut display_name: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "type" => {
                let raw = field.text().await?;
                doc_type = Some(raw.trim().parse()?);
            }
            "display_name" => {
                let raw = field.text().await?;
                let trimmed = raw.trim().to_string();
                if !trimmed.is_empty() {
                    display_name = Some(trimmed);
                }
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "upload.bin".to_string());
                let content_type = field
                    .content_type()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let doc_type =
        doc_type.ok_or_else(|| Error::BadRequest("Missing document type".to_string()))?;
    let file = file.ok_or_else(|| Error::BadRequest("Missing file".to_string()))?;

    let document = state
        .document_service
        .upload(profile_id, owner_role, doc_type, display_name, file)
        .await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

#[axum::debug_handler]
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let (profile_id, _) = resolve_owner(&state, &claims).await?;
    let documents = state.document_service.list_by_profile(profile_id).await?;
    Ok(Json(DocumentListResponse {
        documents: documents.into_iter().map(Into::into).collect(),
    }))
}

#[axum::debug_handler]
pub async fn list_documents_by_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(doc_type): Path<String>,
) -> Result<impl IntoResponse> {
    let (profile_id, _) = resolve_owner(&state, &claims).await?;
    let doc_type: DocumentType = doc_type.parse()?;
    let documents = state
        .document_service
        .list_by_profile_and_type(profile_id, doc_type)
        .await?;
    Ok(Json(DocumentListResponse {
        documents: documents.into_iter().map(Into::into).collect(),
    }))
}

#[axum::debug_handler]
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (profile_id, _) = resolve_owner(&state, &claims).await?;
    state.document_service.delete(id, Some(profile_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
