// src/models/conversation.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single chat message. Append-only within its conversation; never
/// mutated or deleted individually. Carries text content, a file
/// attachment, or both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// A chat thread bound to exactly one swap (`related_swap_id` is unique
/// across the collection). `deleted_for` is a per-viewer archive list: the
/// thread itself is never physically removed while the other participant
/// still has it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participant_ids: Vec<String>,
    pub messages: Vec<Message>,
    pub related_swap_id: String,
    #[serde(default)]
    pub deleted_for: Vec<String>,
}

impl Conversation {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }
}

/// DTO for appending a message. Either `content` or a file attachment must
/// be present.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(max = 2000))]
    pub content: Option<String>,
    pub file_url: Option<String>,
    #[validate(length(max = 100))]
    pub file_type: Option<String>,
    #[validate(length(max = 255))]
    pub file_name: Option<String>,
}
