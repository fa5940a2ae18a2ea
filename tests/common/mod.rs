use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use learn_code_fast::{
    app::build_router,
    db::ExerciseStore,
    llm::{ChatCompletions, Completion, CompletionRequest},
    models::{Exercise, GeneratedExercise, NewSubmission, Submission},
    tasks::{TaskHandle, TaskKind, TaskQueue, TaskStatus},
    AppResult, AppState, Config,
};

/// Store keeping rows in memory, newest last
#[derive(Default)]
pub struct InMemoryStore {
    exercises: Mutex<Vec<Exercise>>,
    submissions: Mutex<Vec<Submission>>,
}

impl InMemoryStore {
    pub fn submission_count(&self, exercise_id: Uuid) -> usize {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .count()
    }
}

#[async_trait]
impl ExerciseStore for InMemoryStore {
    async fn create_exercise(&self, exercise: GeneratedExercise) -> AppResult<Exercise> {
        let row = Exercise {
            id: Uuid::new_v4(),
            title: exercise.title,
            difficulty: exercise.difficulty.as_str().to_string(),
            language: exercise.language,
            prompt_markdown: exercise.prompt_markdown,
            starter_code: exercise.starter_code,
            created_at: Utc::now(),
        };
        self.exercises.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_exercise(&self, id: Uuid) -> AppResult<Option<Exercise>> {
        Ok(self
            .exercises
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn create_submission(&self, submission: NewSubmission) -> AppResult<Submission> {
        let row = Submission {
            id: Uuid::new_v4(),
            exercise_id: submission.exercise_id,
            code: submission.code,
            language: submission.language,
            status: submission.status.as_str().to_string(),
            stdout: submission.stdout,
            stderr: submission.stderr,
            duration_ms: submission.duration_ms,
            score: submission.score,
            tests_run: submission.tests_run,
            tests_failed: submission.tests_failed,
            created_at: Utc::now(),
        };
        self.submissions.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_submissions(&self, exercise_id: Uuid) -> AppResult<Vec<Submission>> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|s| s.exercise_id == exercise_id)
            .cloned()
            .collect())
    }
}

/// Queue that only records what was enqueued
#[derive(Default)]
pub struct RecordingQueue {
    pub tasks: Mutex<Vec<(Uuid, TaskKind)>>,
}

#[async_trait]
impl TaskQueue for RecordingQueue {
    async fn enqueue(&self, task: TaskKind) -> AppResult<TaskHandle> {
        let id = Uuid::new_v4();
        self.tasks.lock().unwrap().push((id, task));
        Ok(TaskHandle {
            id,
            status: TaskStatus::Pending,
        })
    }
}

/// Chat-completion client returning a fixed text
pub struct CannedCompletion(pub String);

#[async_trait]
impl ChatCompletions for CannedCompletion {
    async fn complete(&self, _request: CompletionRequest) -> AppResult<Completion> {
        Ok(Completion {
            content: self.0.clone(),
            total_tokens: Some(17),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub queue: Arc<RecordingQueue>,
}

/// Router over in-memory fakes with default configuration
pub fn test_app(llm: Option<Arc<dyn ChatCompletions>>) -> TestApp {
    let store = Arc::new(InMemoryStore::default());
    let queue = Arc::new(RecordingQueue::default());
    let config = Config::from_source(|_| None).unwrap();

    let state = AppState::new(store.clone(), queue.clone(), llm, config);

    TestApp {
        router: build_router(state),
        store,
        queue,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(uri, &body)).await
    }

    /// POST a raw body, with no content type when the body is empty
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let mut request = Request::post(uri);
        if !body.is_empty() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        self.send(request.body(Body::from(body.to_string())).unwrap()).await
    }

    /// POST and return the raw body text
    pub async fn post_text(&self, uri: &str, body: Value) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(json_request(uri, &body)).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Server-sent events as (event, data) pairs
pub fn parse_sse(body: &str) -> Vec<(String, String)> {
    body.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            let mut event = String::new();
            let mut data = Vec::new();
            for line in block.lines() {
                if let Some(v) = line.strip_prefix("event:") {
                    event = v.trim_start().to_string();
                } else if let Some(v) = line.strip_prefix("data:") {
                    data.push(v.strip_prefix(' ').unwrap_or(v).to_string());
                }
            }
            (event, data.join("\n"))
        })
        .collect()
}
