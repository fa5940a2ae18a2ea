//! Tutoring chat handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Chat routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ask", post(handler::ask_stream))
        .route("/ask/batch", post(handler::ask_batch))
}
