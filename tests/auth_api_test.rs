use std::env;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use tower::ServiceExt;

fn init_test_env() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost:1/placement_test");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("JWT_EXPIRY_MINUTES", "60");
    env::set_var(
        "MESSAGE_KEY",
        "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=",
    );
    env::set_var("STORAGE_BASE_URL", "http://localhost:9000");
    env::set_var("STORAGE_API_KEY", "test");
    env::set_var("AUTH_RPS", "100");
    let _ = placement_backend::config::init_config();
}

/// Router with the same middleware wiring as the binary, over a lazy
/// pool that never connects: every assertion here must be decided
/// before a query would run.
fn test_app() -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/placement_test")
        .expect("lazy pool");
    let state = placement_backend::AppState::new(pool).expect("app state");

    let student_api = Router::new()
        .route(
            "/api/applications/my",
            get(placement_backend::routes::application::my_applications),
        )
        .layer(axum::middleware::from_fn(
            placement_backend::middleware::auth::require_student,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/jobs",
            get(placement_backend::routes::admin::list_all_jobs),
        )
        .layer(axum::middleware::from_fn(
            placement_backend::middleware::auth::require_admin,
        ));

    let message_api = Router::new()
        .route(
            "/api/messages",
            post(placement_backend::routes::message::send_message),
        )
        .layer(axum::middleware::from_fn(
            placement_backend::middleware::auth::require_student_or_recruiter,
        ));

    Router::new()
        .route("/health", get(placement_backend::routes::health::health))
        .merge(student_api)
        .merge(admin_api)
        .merge(message_api)
        .with_state(state)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn health_is_open() {
    init_test_env();
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_route_requires_a_token() {
    init_test_env();
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/applications/my")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    init_test_env();
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/applications/my")
                .header("authorization", bearer("definitely-not-a-jwt"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn basic_scheme_is_rejected() {
    init_test_env();
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/applications/my")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    init_test_env();
    let token =
        placement_backend::utils::token::issue_token("recruiter@acme.example", Some("RECRUITER"))
            .unwrap();

    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/applications/my")
                .header("authorization", bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_surface_rejects_non_admins() {
    init_test_env();
    let token = placement_backend::utils::token::issue_token(
        "student@college.example",
        Some("STUDENT"),
    )
    .unwrap();

    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/jobs")
                .header("authorization", bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_token_without_role_claim_is_forbidden() {
    init_test_env();
    let token =
        placement_backend::utils::token::issue_token("anonymous@example.com", None).unwrap();

    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/jobs")
                .header("authorization", bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn message_surface_allows_both_parties_roles() {
    init_test_env();
    // An admin is not a thread party; the role gate turns them away
    // before any lookup.
    let token =
        placement_backend::utils::token::issue_token("root@portal.example", Some("ADMIN")).unwrap();

    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/messages")
                .header("authorization", bearer(&token))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "application_id": uuid::Uuid::new_v4(),
                        "content": "hello"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
