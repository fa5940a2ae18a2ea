//! Task worker loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands};
use uuid::Uuid;

use super::{redis_queue::store_result, TaskEnvelope, TaskError, TaskKind, TaskResult};
use crate::constants::WORKER_POLL_TIMEOUT_SECS;

/// Consumes task envelopes from the broker list
pub struct Worker {
    broker: ConnectionManager,
    backend: ConnectionManager,
    queue: String,
    shutdown: Arc<AtomicBool>,
}

impl Worker {
    pub fn new(
        broker: ConnectionManager,
        backend: ConnectionManager,
        queue: String,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            broker,
            backend,
            queue,
            shutdown,
        }
    }

    /// Run until the shutdown flag is set
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(queue = %self.queue, "Worker started");

        while !self.shutdown.load(Ordering::SeqCst) {
            if let Err(e) = self.process_next().await {
                tracing::error!("Error processing task: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }

        tracing::info!("Worker shutting down");
        Ok(())
    }

    /// Pop and run one task. Returns false when the poll timed out.
    async fn process_next(&mut self) -> Result<bool> {
        let popped: Option<(String, String)> = self
            .broker
            .brpop(&self.queue, WORKER_POLL_TIMEOUT_SECS as f64)
            .await?;

        let Some((_, raw)) = popped else {
            return Ok(false);
        };

        let (id, task) = match TaskEnvelope::decode(&raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Dropping task: {}", e);
                return Ok(true);
            }
        };

        store_result(&mut self.backend, &TaskResult::started(id)).await?;

        let result = run_task(id, task);
        match &result.error {
            None => tracing::info!(task_id = %id, "Task succeeded"),
            Some(error) => tracing::warn!(task_id = %id, error = %error, "Task failed"),
        }

        store_result(&mut self.backend, &result).await?;
        Ok(true)
    }
}

/// Execute a decoded task into its final result entry
pub fn run_task(id: Uuid, task: std::result::Result<TaskKind, TaskError>) -> TaskResult {
    TaskResult::finished(id, task.and_then(|task| task.execute()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStatus;
    use serde_json::Value;

    #[test]
    fn test_run_echo_task() {
        let id = Uuid::new_v4();
        let result = run_task(
            id,
            Ok(TaskKind::Echo {
                message: "ping".to_string(),
            }),
        );
        assert_eq!(result.task_id, id);
        assert_eq!(result.status, TaskStatus::Success);
        assert_eq!(result.result, Some(Value::String("echo: ping".to_string())));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_run_unknown_task_fails() {
        let result = run_task(Uuid::new_v4(), Err(TaskError::UnknownTask("nope".to_string())));
        assert_eq!(result.status, TaskStatus::Failure);
        assert!(result.result.is_none());
        assert!(result.date_done.is_some());
    }
}
