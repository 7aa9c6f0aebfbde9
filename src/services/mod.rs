pub mod application_service;
pub mod document_service;
pub mod job_service;
pub mod message_service;
pub mod profile_service;
pub mod storage_service;
pub mod user_service;
