use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::dto::auth_dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::error::{Error, Result};
use crate::models::account::{Account, Role};
use crate::models::reset_token::PasswordResetToken;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::{generate_reset_token, issue_token};

const RESET_TOKEN_LENGTH: usize = 48;
const RESET_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<AuthResponse> {
        if payload.password != payload.confirm_password {
            return Err(Error::BadRequest("Passwords do not match".to_string()));
        }
        let role: Role = payload.role.parse()?;

        let existing = sqlx::query_scalar::<_, uuid::Uuid>(
            "SELECT id FROM accounts WHERE email = $1",
        )
        .bind(&payload.email)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&payload.password)?;
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        let token = issue_token(&account.email, Some(account.role.as_str()))?;
        Ok(AuthResponse {
            token,
            message: "Registered successfully".to_string(),
        })
    }

    pub async fn login(&self, payload: LoginRequest) -> Result<AuthResponse> {
        let account = self
            .get_by_email(&payload.email)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&payload.password, &account.password_hash)? {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }
        if !account.is_active {
            return Err(Error::Unauthorized("Account is deactivated".to_string()));
        }

        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET login_count = login_count + 1, last_login_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(account.id)
        .fetch_one(&self.pool)
        .await?;

        info!(
            email = %account.email,
            login_count = account.login_count,
            "login successful"
        );

        let token = issue_token(&account.email, Some(account.role.as_str()))?;
        Ok(AuthResponse {
            token,
            message: "Login successful".to_string(),
        })
    }

    pub async fn forgot_password(&self, payload: ForgotPasswordRequest) -> Result<()> {
        let account = self
            .get_by_email(&payload.email)
            .await?
            .ok_or_else(|| Error::NotFound("No account found with this email".to_string()))?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE account_id = $1")
            .bind(account.id)
            .execute(&self.pool)
            .await?;

        let token = generate_reset_token(RESET_TOKEN_LENGTH);
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (account_id, token, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.id)
        .bind(&token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        // No mailer is wired up; surface the link in the logs instead.
        let config = crate::config::get_config();
        info!(
            email = %account.email,
            link = format!("{}?token={}", config.reset_link_base_url, token),
            "password reset link issued"
        );
        Ok(())
    }

    pub async fn reset_password(&self, payload: ResetPasswordRequest) -> Result<AuthResponse> {
        if payload.new_password != payload.confirm_password {
            return Err(Error::BadRequest("Passwords do not match".to_string()));
        }

        let reset = sqlx::query_as::<_, PasswordResetToken>(
            "SELECT * FROM password_reset_tokens WHERE token = $1",
        )
        .bind(&payload.token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::BadRequest("Invalid or expired reset token".to_string()))?;

        if reset.is_expired() {
            sqlx::query("DELETE FROM password_reset_tokens WHERE id = $1")
                .bind(reset.id)
                .execute(&self.pool)
                .await?;
            return Err(Error::BadRequest("Reset token has expired".to_string()));
        }
        if reset.used {
            return Err(Error::BadRequest(
                "Reset token has already been used".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.new_password)?;
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(reset.account_id)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE password_reset_tokens SET used = TRUE WHERE id = $1")
            .bind(reset.id)
            .execute(&self.pool)
            .await?;

        let token = issue_token(&account.email, Some(account.role.as_str()))?;
        Ok(AuthResponse {
            token,
            message: "Password has been reset successfully".to_string(),
        })
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }
}
