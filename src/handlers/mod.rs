//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod chat;
pub mod exercises;
pub mod health;
pub mod jobs;
pub mod system;
pub mod user_context;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(system::routes())
        .merge(health::routes())
        .merge(user_context::routes())
        .nest("/exercises", exercises::routes())
        .nest("/chat", chat::routes())
        .nest("/jobs", jobs::routes())
}
