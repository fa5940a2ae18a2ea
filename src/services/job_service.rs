//! Background job service

use crate::{
    error::AppResult,
    handlers::jobs::response::EchoResponse,
    tasks::{TaskKind, TaskQueue},
};

/// Job dispatch service
pub struct JobService;

impl JobService {
    /// Queue the echo task; the returned status is the queue-side state right
    /// after enqueueing
    pub async fn enqueue_echo(queue: &dyn TaskQueue, message: String) -> AppResult<EchoResponse> {
        let handle = queue.enqueue(TaskKind::Echo { message }).await?;

        Ok(EchoResponse {
            task_id: handle.id,
            status: handle.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::tasks::{MockTaskQueue, TaskHandle, TaskStatus};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_enqueue_echo() {
        let id = Uuid::new_v4();
        let mut queue = MockTaskQueue::new();
        queue
            .expect_enqueue()
            .withf(|task| {
                *task
                    == TaskKind::Echo {
                        message: "hello".to_string(),
                    }
            })
            .times(1)
            .returning(move |_| {
                Ok(TaskHandle {
                    id,
                    status: TaskStatus::Pending,
                })
            });

        let job = JobService::enqueue_echo(&queue, "hello".to_string()).await.unwrap();
        assert_eq!(job.task_id, id);
        assert_eq!(job.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_broker_failure_propagates() {
        let mut queue = MockTaskQueue::new();
        queue
            .expect_enqueue()
            .returning(|_| Err(AppError::Redis("connection refused".to_string())));

        let err = JobService::enqueue_echo(&queue, "ping".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "REDIS_ERROR");
    }
}
