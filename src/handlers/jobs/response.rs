//! Job response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::tasks::TaskStatus;

/// Enqueued job
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub task_id: Uuid,
    pub status: TaskStatus,
}
