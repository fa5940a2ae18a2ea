//! Background tasks
//!
//! Tasks travel as JSON envelopes on a Redis list. The API pushes them through a
//! [`TaskQueue`]; the `worker` binary pops, executes and records the outcome in the
//! result backend under `task-meta-<id>`.

pub mod redis_queue;
pub mod worker;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppResult;

pub use redis_queue::RedisTaskQueue;
pub use worker::Worker;

/// A task and its arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "args", rename_all = "snake_case")]
pub enum TaskKind {
    Echo { message: String },
}

impl TaskKind {
    /// Every task name the worker knows
    pub const NAMES: &[&str] = &["echo"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Echo { .. } => "echo",
        }
    }

    /// Run the task to completion
    pub fn execute(&self) -> Result<Value, TaskError> {
        match self {
            Self::Echo { message } => Ok(Value::String(echo(message))),
        }
    }
}

/// The echo task
pub fn echo(message: &str) -> String {
    format!("echo: {}", message)
}

/// Lifecycle states, as stored in the result backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Started,
    Success,
    Failure,
}

/// What gets pushed onto the queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub id: Uuid,
    pub task: TaskKind,
    pub enqueued_at: DateTime<Utc>,
}

/// Envelope with the task still undecoded, so an unknown task name can be
/// reported against its id
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    id: Uuid,
    task: Value,
}

impl TaskEnvelope {
    pub fn new(task: TaskKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            task,
            enqueued_at: Utc::now(),
        }
    }

    /// Decode a queued payload. `Err(Malformed)` means there is no usable id;
    /// `Ok((id, Err(_)))` means the id is known but the task is not.
    pub fn decode(raw: &str) -> Result<(Uuid, Result<TaskKind, TaskError>), TaskError> {
        let envelope: RawEnvelope =
            serde_json::from_str(raw).map_err(|e| TaskError::Malformed(e.to_string()))?;

        let name = envelope
            .task
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let task = serde_json::from_value::<TaskKind>(envelope.task).map_err(|e| {
            if TaskKind::NAMES.contains(&name.as_str()) {
                TaskError::InvalidArguments(e.to_string())
            } else {
                TaskError::UnknownTask(name)
            }
        });

        Ok((envelope.id, task))
    }
}

/// Entry in the result backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: Uuid,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_done: Option<DateTime<Utc>>,
}

impl TaskResult {
    pub fn pending(task_id: Uuid) -> Self {
        Self::state(task_id, TaskStatus::Pending)
    }

    pub fn started(task_id: Uuid) -> Self {
        Self::state(task_id, TaskStatus::Started)
    }

    /// Final entry for a finished task
    pub fn finished(task_id: Uuid, outcome: Result<Value, TaskError>) -> Self {
        let (status, result, error) = match outcome {
            Ok(value) => (TaskStatus::Success, Some(value), None),
            Err(e) => (TaskStatus::Failure, None, Some(e.to_string())),
        };

        Self {
            task_id,
            status,
            result,
            error,
            date_done: Some(Utc::now()),
        }
    }

    fn state(task_id: Uuid, status: TaskStatus) -> Self {
        Self {
            task_id,
            status,
            result: None,
            error: None,
            date_done: None,
        }
    }
}

/// Id and state of a task right after it was enqueued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle {
    pub id: Uuid,
    pub status: TaskStatus,
}

/// Task failures
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Malformed task envelope: {0}")]
    Malformed(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Invalid task arguments: {0}")]
    InvalidArguments(String),
}

/// Where the API sends tasks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueue: Send + Sync {
    async fn enqueue(&self, task: TaskKind) -> AppResult<TaskHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo() {
        assert_eq!(echo("ping"), "echo: ping");
        assert_eq!(echo(""), "echo: ");
        let result = TaskKind::Echo {
            message: "hello".to_string(),
        }
        .execute()
        .unwrap();
        assert_eq!(result, Value::String("echo: hello".to_string()));
    }

    #[test]
    fn test_envelope_wire_format() {
        let envelope = TaskEnvelope::new(TaskKind::Echo {
            message: "ping".to_string(),
        });
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["task"]["name"], "echo");
        assert_eq!(json["task"]["args"]["message"], "ping");
        assert_eq!(json["id"], envelope.id.to_string());

        let (id, task) = TaskEnvelope::decode(&json.to_string()).unwrap();
        assert_eq!(id, envelope.id);
        assert_eq!(task.unwrap(), envelope.task);
    }

    #[test]
    fn test_names_cover_every_task() {
        let echo = TaskKind::Echo {
            message: String::new(),
        };
        assert!(TaskKind::NAMES.contains(&echo.name()));
        assert_eq!(serde_json::to_value(&echo).unwrap()["name"], echo.name());
    }

    #[test]
    fn test_decode_unknown_task_keeps_id() {
        let id = Uuid::new_v4();
        let raw = format!(r#"{{"id":"{}","task":{{"name":"reticulate","args":{{}}}}}}"#, id);
        let (decoded_id, task) = TaskEnvelope::decode(&raw).unwrap();
        assert_eq!(decoded_id, id);
        assert!(matches!(task, Err(TaskError::UnknownTask(name)) if name == "reticulate"));

        let raw = format!(r#"{{"id":"{}","task":{{"name":"echo","args":{{}}}}}}"#, id);
        let (_, task) = TaskEnvelope::decode(&raw).unwrap();
        assert!(matches!(task, Err(TaskError::InvalidArguments(_))));
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            TaskEnvelope::decode("not json"),
            Err(TaskError::Malformed(_))
        ));
        assert!(matches!(
            TaskEnvelope::decode(r#"{"task":{"name":"echo"}}"#),
            Err(TaskError::Malformed(_))
        ));
    }

    #[test]
    fn test_result_entries() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(TaskResult::pending(id)).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert!(json.get("result").is_none());
        assert!(json.get("date_done").is_none());

        let done = TaskResult::finished(id, Ok(Value::String("echo: ping".to_string())));
        assert_eq!(done.status, TaskStatus::Success);
        assert!(done.date_done.is_some());

        let failed = TaskResult::finished(id, Err(TaskError::UnknownTask("x".to_string())));
        assert_eq!(failed.status, TaskStatus::Failure);
        assert_eq!(failed.error.as_deref(), Some("Unknown task: x"));
    }
}
