use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::message_dto::MessageResponse;
use crate::error::{Error, Result};
use crate::models::account::Role;
use crate::models::message::Message;
use crate::utils::encryption::MessageCipher;

/// The two party emails of an application thread: the applying student
/// and the recruiter who posted the job.
#[derive(Debug, Clone, sqlx::FromRow)]
struct Parties {
    student_email: String,
    recruiter_email: String,
}

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
    cipher: MessageCipher,
}

impl MessageService {
    pub fn new(pool: PgPool, cipher: MessageCipher) -> Self {
        Self { pool, cipher }
    }

    async fn parties(&self, application_id: Uuid) -> Result<Parties> {
        let parties = sqlx::query_as::<_, Parties>(
            r#"
            SELECT sp.email AS student_email, rp.email AS recruiter_email
            FROM applications a
            JOIN student_profiles sp ON sp.id = a.student_profile_id
            JOIN jobs j ON j.id = a.job_id
            JOIN recruiter_profiles rp ON rp.id = j.recruiter_profile_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;
        parties.ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    /// Send a message on an application thread. The sender must be one
    /// of the thread's parties; the receiver is the opposite party.
    /// Content is encrypted at rest but the caller gets plaintext back.
    pub async fn send(
        &self,
        application_id: Uuid,
        sender_email: &str,
        content: &str,
    ) -> Result<MessageResponse> {
        if content.trim().is_empty() {
            return Err(Error::BadRequest("Message content is required".to_string()));
        }

        let parties = self.parties(application_id).await?;
        let (sender_role, receiver_email, receiver_role) =
            if sender_email.eq_ignore_ascii_case(&parties.student_email) {
                (Role::Student, parties.recruiter_email.clone(), Role::Recruiter)
            } else if sender_email.eq_ignore_ascii_case(&parties.recruiter_email) {
                (Role::Recruiter, parties.student_email.clone(), Role::Student)
            } else {
                return Err(Error::Forbidden(
                    "You are not a party to this application".to_string(),
                ));
            };

        let ciphertext = self.cipher.encrypt(content)?;
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                application_id, sender_email, sender_role,
                receiver_email, receiver_role, content
            ) VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(sender_email)
        .bind(sender_role.as_str())
        .bind(&receiver_email)
        .bind(receiver_role.as_str())
        .bind(&ciphertext)
        .fetch_one(&self.pool)
        .await?;

        let sender_name = self
            .resolve_sender_name(&message.sender_email, &message.sender_role)
            .await;
        Ok(MessageResponse::from_plaintext(
            message,
            content.to_string(),
            sender_name,
        ))
    }

    /// The thread for an application, oldest first, visible only to its
    /// parties. Rows that fail to decrypt come back as a placeholder so
    /// one corrupt message never hides the rest.
    pub async fn list_for_application(
        &self,
        application_id: Uuid,
        caller_email: &str,
    ) -> Result<Vec<MessageResponse>> {
        let parties = self.parties(application_id).await?;
        if !caller_email.eq_ignore_ascii_case(&parties.student_email)
            && !caller_email.eq_ignore_ascii_case(&parties.recruiter_email)
        {
            return Err(Error::Forbidden(
                "You are not a party to this application".to_string(),
            ));
        }

        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE application_id = $1 ORDER BY sent_at ASC",
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        let mut name_cache: HashMap<String, String> = HashMap::new();
        let mut responses = Vec::with_capacity(messages.len());
        for message in messages {
            let cache_key = message.sender_email.to_ascii_lowercase();
            let sender_name = match name_cache.get(&cache_key) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .resolve_sender_name(&message.sender_email, &message.sender_role)
                        .await;
                    name_cache.insert(cache_key, name.clone());
                    name
                }
            };
            let plaintext = self.cipher.decrypt_or_placeholder(&message.content);
            responses.push(MessageResponse::from_plaintext(
                message, plaintext, sender_name,
            ));
        }
        Ok(responses)
    }

    /// Display name from the sender's role-appropriate profile, falling
    /// back to the raw email.
    async fn resolve_sender_name(&self, email: &str, role: &str) -> String {
        let name: Option<(String, String)> = if role.eq_ignore_ascii_case(Role::Recruiter.as_str())
        {
            sqlx::query_as(
                "SELECT first_name, last_name FROM recruiter_profiles WHERE email = $1",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .ok()
            .flatten()
        } else {
            sqlx::query_as("SELECT first_name, last_name FROM student_profiles WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .ok()
                .flatten()
        };

        match name {
            Some((first, last)) => {
                let full = format!("{} {}", first, last).trim().to_string();
                if full.is_empty() {
                    email.to_string()
                } else {
                    full
                }
            }
            None => email.to_string(),
        }
    }
}
