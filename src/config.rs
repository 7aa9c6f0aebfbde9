use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    /// Base64-encoded 32-byte key for message content encryption.
    pub message_key: String,
    pub storage_base_url: String,
    pub storage_api_key: String,
    pub auth_rps: u32,
    pub reset_link_base_url: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_expiry_minutes: get_env_parse("JWT_EXPIRY_MINUTES")?,
            message_key: get_env("MESSAGE_KEY")?,
            storage_base_url: get_env("STORAGE_BASE_URL")?,
            storage_api_key: get_env("STORAGE_API_KEY")?,
            auth_rps: get_env_parse("AUTH_RPS")?,
            reset_link_base_url: env::var("RESET_LINK_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/reset-password".to_string()),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
