use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted message row. `content` holds the base64 ciphertext, never
/// plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub application_id: Uuid,
    pub sender_email: String,
    pub sender_role: String,
    pub receiver_email: String,
    pub receiver_role: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}
