//! Exercise response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Difficulty, Exercise, Submission, SubmissionStatus};

/// Exercise view
#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub title: String,
    pub difficulty: Difficulty,
    pub language: String,
    pub prompt_markdown: String,
    pub starter_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            difficulty: exercise.difficulty(),
            id: exercise.id,
            title: exercise.title,
            language: exercise.language,
            prompt_markdown: exercise.prompt_markdown,
            starter_code: exercise.starter_code,
            created_at: exercise.created_at,
        }
    }
}

/// Result of a placeholder run
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: i32,
}

/// Result of a scored submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: SubmissionStatus,
    pub score: f64,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: i32,
    pub details: SubmissionDetails,
}

#[derive(Debug, Serialize)]
pub struct SubmissionDetails {
    pub tests_run: i32,
    pub tests_failed: i32,
}

/// Recorded submission, without its source code
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub language: String,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: i32,
    pub score: Option<f64>,
    pub tests_run: Option<i32>,
    pub tests_failed: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            exercise_id: submission.exercise_id,
            language: submission.language,
            status: submission.status,
            stdout: submission.stdout,
            stderr: submission.stderr,
            duration_ms: submission.duration_ms,
            score: submission.score,
            tests_run: submission.tests_run,
            tests_failed: submission.tests_failed,
            created_at: submission.created_at,
        }
    }
}

/// Submission list response
#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub total: usize,
}
