//! Chat-completion integration
//!
//! Services talk to the external model through [`ChatCompletions`]; the only
//! production implementation is [`AzureOpenAi`]. When credentials are not configured
//! the application state carries no client and callers use their local fallbacks.

pub mod azure;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

pub use azure::AzureOpenAi;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A single chat-completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Constrain the reply to a JSON object
    pub json_object: bool,
}

/// Text of the first choice plus reported usage
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub total_tokens: Option<u32>,
}

/// Chat-completion backend
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Completion>;
}
