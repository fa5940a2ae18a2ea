//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default application name reported by `/` and `/config`
pub const DEFAULT_APP_NAME: &str = "Learn Code Fast API";

/// Default deployment environment name
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default database connection string
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres:postgres@db:5432/app";

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Connection attempts at startup before giving up
pub const DEFAULT_DATABASE_CONNECT_ATTEMPTS: u32 = 20;

/// Fixed delay between startup connection attempts, in seconds
pub const DEFAULT_DATABASE_CONNECT_RETRY_SECS: u64 = 1;

// =============================================================================
// TASK QUEUE DEFAULTS
// =============================================================================

/// Default Redis URL, used for both broker and result backend unless overridden
pub const DEFAULT_REDIS_URL: &str = "redis://redis:6379/0";

/// Default queue name tasks are routed to
pub const DEFAULT_TASK_QUEUE: &str = "default";

/// Prefix of result-backend keys, followed by the task id
pub const TASK_META_KEY_PREFIX: &str = "task-meta-";

/// Seconds a task result is kept in the result backend
pub const TASK_RESULT_EXPIRY_SECS: u64 = 86_400;

/// Seconds a worker blocks on the queue before re-checking for shutdown
pub const WORKER_POLL_TIMEOUT_SECS: u64 = 5;

/// Message used by the echo job when the caller omits one
pub const DEFAULT_ECHO_MESSAGE: &str = "ping";

// =============================================================================
// CHAT COMPLETION DEFAULTS
// =============================================================================

/// Default Azure OpenAI API version
pub const DEFAULT_AZURE_OPENAI_API_VERSION: &str = "2024-02-15-preview";

/// Default request timeout for the chat-completion API, in seconds
pub const DEFAULT_AZURE_OPENAI_TIMEOUT_SECS: u64 = 60;

/// Token budget for exercise generation
pub const EXERCISE_MAX_TOKENS: u32 = 350;

/// Sampling temperature for exercise generation
pub const EXERCISE_TEMPERATURE: f32 = 0.6;

/// Token budget for tutoring replies
pub const CHAT_MAX_TOKENS: u32 = 800;

/// Sampling temperature for tutoring replies
pub const CHAT_TEMPERATURE: f32 = 0.5;

/// Characters per streamed chat event
pub const CHAT_STREAM_CHUNK_CHARS: usize = 400;

/// Data of the final streamed chat event
pub const CHAT_STREAM_DONE_MARKER: &str = "[DONE]";

// =============================================================================
// EXERCISE DEFAULTS
// =============================================================================

/// Language used when a generation request omits one
pub const DEFAULT_EXERCISE_LANGUAGE: &str = "python";

/// Topic used by the local template when a generation request omits one
pub const DEFAULT_EXERCISE_TOPIC: &str = "fundamentals";

/// Fixed test-count metadata attached to every scored submission
pub mod scoring {
    pub const TESTS_RUN: i32 = 1;
    pub const TESTS_FAILED: i32 = 0;
    pub const PASSED_SCORE: f64 = 1.0;
    pub const FAILED_SCORE: f64 = 0.0;
}

// =============================================================================
// USER CONTEXT
// =============================================================================

/// User id used when `/user-context` is called without one
pub const DEFAULT_USER_ID: &str = "demo-user";

/// Version tag of the user-context payload
pub const USER_CONTEXT_VERSION: &str = "v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum topic length on generation requests
pub const MAX_TOPIC_LENGTH: u64 = 200;

/// Maximum language name length (matches the column width)
pub const MAX_LANGUAGE_LENGTH: u64 = 64;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum chat message length
pub const MAX_CHAT_MESSAGE_LENGTH: u64 = 8_000;

/// Maximum turns of prior conversation accepted with a chat message
pub const MAX_CONVERSATION_TURNS: u64 = 50;

/// Maximum echo message length
pub const MAX_ECHO_MESSAGE_LENGTH: u64 = 1_000;
