//! Learn Code Fast - backend for a coding-exercise learning product
//!
//! # Features
//!
//! - Exercise generation through Azure OpenAI, with a local template fallback
//! - Placeholder code runs and constant-heuristic scoring of submissions
//! - Tutoring chat, in one response or as server-sent events
//! - An echo task dispatched to a Redis-backed worker queue
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Store / Repositories**: Database access
//! - **Models**: Domain models

pub mod app;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod tasks;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
