//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod exercise;
pub mod submission;
pub mod user_context;

pub use exercise::*;
pub use submission::*;
pub use user_context::*;
