//! Exercise handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Exercise routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handler::generate_exercise))
        .route("/{id}", get(handler::get_exercise))
        .route("/{id}/submissions", get(handler::list_submissions))
        .route("/{id}/run", post(handler::run_code))
        .route("/{id}/submit", post(handler::submit_code))
}
