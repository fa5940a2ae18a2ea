//! Redis-backed task queue

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use uuid::Uuid;

use super::{TaskEnvelope, TaskHandle, TaskKind, TaskQueue, TaskResult, TaskStatus};
use crate::{
    constants::{TASK_META_KEY_PREFIX, TASK_RESULT_EXPIRY_SECS},
    error::{AppError, AppResult},
};

/// Pushes envelopes onto the broker list and seeds their result entry
#[derive(Clone)]
pub struct RedisTaskQueue {
    broker: ConnectionManager,
    backend: ConnectionManager,
    queue: String,
}

impl RedisTaskQueue {
    pub fn new(broker: ConnectionManager, backend: ConnectionManager, queue: String) -> Self {
        Self {
            broker,
            backend,
            queue,
        }
    }
}

#[async_trait]
impl TaskQueue for RedisTaskQueue {
    async fn enqueue(&self, task: TaskKind) -> AppResult<TaskHandle> {
        let envelope = TaskEnvelope::new(task);
        let payload = serde_json::to_string(&envelope).map_err(anyhow::Error::from)?;

        // Seed the result entry first so a fast worker cannot be overwritten by PENDING
        let mut backend = self.backend.clone();
        store_result(&mut backend, &TaskResult::pending(envelope.id)).await?;

        let mut broker = self.broker.clone();
        broker
            .lpush::<_, _, ()>(&self.queue, payload)
            .await
            .map_err(|e| AppError::Redis(format!("Failed to enqueue task: {}", e)))?;

        tracing::info!(
            task_id = %envelope.id,
            task = envelope.task.name(),
            queue = %self.queue,
            "Task enqueued"
        );

        Ok(TaskHandle {
            id: envelope.id,
            status: TaskStatus::Pending,
        })
    }
}

/// Result-backend key of a task
pub fn meta_key(task_id: &Uuid) -> String {
    format!("{}{}", TASK_META_KEY_PREFIX, task_id)
}

/// Write a task's result entry with the standard expiry
pub async fn store_result(
    conn: &mut ConnectionManager,
    result: &TaskResult,
) -> Result<(), redis::RedisError> {
    let value = serde_json::to_string(result).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "task result serialization",
            e.to_string(),
        ))
    })?;

    conn.set_ex::<_, _, ()>(meta_key(&result.task_id), value, TASK_RESULT_EXPIRY_SECS)
        .await
}
