pub mod account;
pub mod application;
pub mod document;
pub mod job;
pub mod message;
pub mod recruiter_profile;
pub mod reset_token;
pub mod student_profile;
