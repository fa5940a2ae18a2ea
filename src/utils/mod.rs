//! Utility functions

pub mod validation;

pub use validation::validate_not_blank;
