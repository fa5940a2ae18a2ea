//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Submission database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub code: String,
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

/// Values written to `submissions.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Ran,
    Passed,
    Failed,
}

impl SubmissionStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ran => "ran",
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Insert payload for a submission row
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub exercise_id: Uuid,
    pub code: String,
    pub language: String,
    pub status: SubmissionStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: i32,
    pub score: Option<f64>,
    pub tests_run: Option<i32>,
    pub tests_failed: Option<i32>,
}
