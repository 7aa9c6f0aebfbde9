use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::account::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case(role.as_str()))
            .unwrap_or(false)
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn decode_bearer(req: &Request) -> Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(unauthorized("missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(unauthorized("bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized("unsupported_scheme"));
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized("invalid_token"))
}

async fn run_with_roles(mut req: Request, next: Next, allowed: &[Role]) -> Response {
    let claims = match decode_bearer(&req) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };
    if !allowed.is_empty() && !allowed.iter().any(|r| claims.has_role(*r)) {
        return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response();
    }
    req.extensions_mut().insert(claims);
    next.run(req).await
}

/// Any authenticated caller, role not inspected.
pub async fn require_bearer_auth(req: Request, next: Next) -> Response {
    run_with_roles(req, next, &[]).await
}

pub async fn require_student(req: Request, next: Next) -> Response {
    run_with_roles(req, next, &[Role::Student]).await
}

pub async fn require_recruiter(req: Request, next: Next) -> Response {
    run_with_roles(req, next, &[Role::Recruiter]).await
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    run_with_roles(req, next, &[Role::Admin]).await
}

/// Either party of an application thread may hold these routes.
pub async fn require_student_or_recruiter(req: Request, next: Next) -> Response {
    run_with_roles(req, next, &[Role::Student, Role::Recruiter]).await
}

pub async fn require_recruiter_or_admin(req: Request, next: Next) -> Response {
    run_with_roles(req, next, &[Role::Recruiter, Role::Admin]).await
}
