use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::message::Message;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub application_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub sender_email: String,
    pub sender_role: String,
    pub sender_name: String,
    pub receiver_email: String,
    pub receiver_role: String,
    /// Always plaintext; ciphertext never leaves the service layer.
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn from_plaintext(message: Message, content: String, sender_name: String) -> Self {
        Self {
            id: message.id,
            application_id: message.application_id,
            sender_email: message.sender_email,
            sender_role: message.sender_role,
            sender_name,
            receiver_email: message.receiver_email,
            receiver_role: message.receiver_role,
            content,
            sent_at: message.sent_at,
        }
    }
}
