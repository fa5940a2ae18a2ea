//! Chat response DTOs

use serde::Serialize;

/// Complete tutor reply
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub tokens_used: u32,
}

/// Data of one streamed `message` event
#[derive(Debug, Serialize)]
pub struct StreamChunk {
    pub content: String,
}
