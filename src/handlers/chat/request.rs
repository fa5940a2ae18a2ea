//! Chat request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_CHAT_MESSAGE_LENGTH, MAX_CONVERSATION_TURNS},
    llm::ChatMessage,
};

/// Tutoring chat request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(max = MAX_CHAT_MESSAGE_LENGTH))]
    pub message: String,

    /// Exercise the learner is working on; ignored when it does not resolve
    pub exercise_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(max = MAX_CONVERSATION_TURNS))]
    pub conversation_history: Vec<ChatMessage>,
}
