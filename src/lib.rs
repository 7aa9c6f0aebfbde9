pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::error::Result;
use crate::services::{
    application_service::ApplicationService, document_service::DocumentService,
    job_service::JobService, message_service::MessageService, profile_service::ProfileService,
    storage_service::StorageClient, user_service::UserService,
};
use crate::utils::encryption::MessageCipher;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub profile_service: ProfileService,
    pub document_service: DocumentService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub message_service: MessageService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Result<Self> {
        let config = crate::config::get_config();
        let storage = StorageClient::new(
            config.storage_base_url.clone(),
            config.storage_api_key.clone(),
        );
        let cipher = MessageCipher::from_base64(&config.message_key)?;

        let user_service = UserService::new(pool.clone());
        let profile_service = ProfileService::new(pool.clone());
        let document_service = DocumentService::new(pool.clone(), storage);
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let message_service = MessageService::new(pool.clone(), cipher);

        Ok(Self {
            pool,
            user_service,
            profile_service,
            document_service,
            job_service,
            application_service,
            message_service,
        })
    }
}
