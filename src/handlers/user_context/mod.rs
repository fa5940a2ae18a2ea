//! Learner context handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// User-context routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/user-context", get(handler::get_user_context))
}
