use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;

/// Issue a bearer token carrying the subject email, role claim and a
/// fixed expiry from config.
pub fn issue_token(subject_email: &str, role: Option<&str>) -> Result<String> {
    let config = crate::config::get_config();
    let expires = Utc::now() + Duration::minutes(config.jwt_expiry_minutes);
    let claims = Claims {
        sub: subject_email.to_string(),
        exp: expires.timestamp() as usize,
        role: role.map(|r| r.to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

pub fn verify_token(token: &str) -> Result<Claims> {
    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthorized("Invalid or expired token".to_string()))
}

pub fn generate_reset_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_config() {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        std::env::set_var("DATABASE_URL", "postgres://localhost/test");
        std::env::set_var("JWT_SECRET", "test_secret_key");
        std::env::set_var("JWT_EXPIRY_MINUTES", "60");
        std::env::set_var(
            "MESSAGE_KEY",
            "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=",
        );
        std::env::set_var("STORAGE_BASE_URL", "http://localhost:9000");
        std::env::set_var("STORAGE_API_KEY", "test");
        std::env::set_var("AUTH_RPS", "100");
        let _ = crate::config::init_config();
    }

    #[test]
    fn issued_token_verifies_and_carries_claims() {
        init_test_config();
        let token = issue_token("alice@example.com", Some("STUDENT")).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.role.as_deref(), Some("STUDENT"));
    }

    #[test]
    fn garbage_token_is_rejected() {
        init_test_config();
        assert!(verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn reset_tokens_are_alphanumeric_and_sized() {
        let token = generate_reset_token(48);
        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
