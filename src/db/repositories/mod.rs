//! Database repositories
//!
//! Repositories handle all direct database interactions. They run on a caller-supplied
//! connection so the store decides the transaction boundary.

pub mod exercise_repo;
pub mod submission_repo;

pub use exercise_repo::ExerciseRepository;
pub use submission_repo::SubmissionRepository;
