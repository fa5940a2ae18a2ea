//! Business logic services

pub mod chat_service;
pub mod execution_service;
pub mod exercise_service;
pub mod generation_service;
pub mod job_service;
pub mod user_context_service;

pub use chat_service::ChatService;
pub use execution_service::ExecutionService;
pub use exercise_service::ExerciseService;
pub use generation_service::GenerationService;
pub use job_service::JobService;
pub use user_context_service::UserContextService;
