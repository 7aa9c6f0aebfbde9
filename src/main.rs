use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use placement_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, cors::permissive_cors, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool)?;

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let auth_api = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route(
            "/api/auth/forgot-password",
            post(routes::auth::forgot_password),
        )
        .route(
            "/api/auth/reset-password",
            post(routes::auth::reset_password),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(config.auth_rps),
            rate_limit::rps_middleware,
        ));

    let student_api = Router::new()
        .route(
            "/api/profile/student",
            get(routes::profile::get_student_profile).put(routes::profile::upsert_student_profile),
        )
        .route("/api/applications/apply", post(routes::application::apply))
        .route(
            "/api/applications/my",
            get(routes::application::my_applications),
        )
        .layer(axum::middleware::from_fn(auth::require_student));

    let recruiter_api = Router::new()
        .route(
            "/api/profile/recruiter",
            get(routes::profile::get_recruiter_profile)
                .put(routes::profile::upsert_recruiter_profile),
        )
        .route(
            "/api/recruiter/jobs",
            get(routes::job::my_jobs).post(routes::job::post_job),
        )
        .route("/api/recruiter/jobs/:id", delete(routes::job::delete_job))
        .route(
            "/api/applications/job/:job_id",
            get(routes::application::applications_for_job),
        )
        .layer(axum::middleware::from_fn(auth::require_recruiter));

    let review_api = Router::new()
        .route(
            "/api/applications/:id/status",
            patch(routes::application::update_application_status),
        )
        .layer(axum::middleware::from_fn(auth::require_recruiter_or_admin));

    let shared_api = Router::new()
        .route("/api/jobs", get(routes::job::list_approved_jobs))
        .layer(axum::middleware::from_fn(auth::require_bearer_auth));

    let document_api = Router::new()
        .route(
            "/api/documents/upload",
            post(routes::document::upload_document),
        )
        .route("/api/documents", get(routes::document::list_documents))
        .route(
            "/api/documents/type/:doc_type",
            get(routes::document::list_documents_by_type),
        )
        .route(
            "/api/documents/:id",
            delete(routes::document::delete_document),
        )
        .layer(axum::middleware::from_fn(auth::require_student_or_recruiter));

    let message_api = Router::new()
        .route("/api/messages", post(routes::message::send_message))
        .route(
            "/api/messages/:application_id",
            get(routes::message::thread_for_application),
        )
        .layer(axum::middleware::from_fn(auth::require_student_or_recruiter));

    let admin_api = Router::new()
        .route("/api/admin/jobs", get(routes::admin::list_all_jobs))
        .route(
            "/api/admin/jobs/:id/status",
            patch(routes::admin::approve_or_reject_job),
        )
        .route(
            "/api/admin/documents/:id/status",
            patch(routes::admin::review_document),
        )
        .route(
            "/api/admin/documents/:id",
            delete(routes::admin::delete_document),
        )
        .route("/api/admin/profiles", get(routes::admin::list_profiles))
        .layer(axum::middleware::from_fn(auth::require_admin));

    let app = base_routes
        .merge(auth_api)
        .merge(student_api)
        .merge(recruiter_api)
        .merge(review_api)
        .merge(shared_api)
        .merge(document_api)
        .merge(message_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
