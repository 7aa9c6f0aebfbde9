pub mod admin;
pub mod application;
pub mod auth;
pub mod document;
pub mod health;
pub mod job;
pub mod message;
pub mod profile;
