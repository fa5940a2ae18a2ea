//! Exercise store
//!
//! The seam between services and persistence. Every operation on [`PgStore`] runs in
//! its own scoped session: writes open a transaction that is committed on success and
//! rolled back when dropped on any error path, reads hold a pooled connection that is
//! returned when the call ends.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ExerciseRepository, SubmissionRepository},
    error::AppResult,
    models::{Exercise, GeneratedExercise, NewSubmission, Submission},
};

/// Persistence operations needed by the services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Insert one exercise and return it with its id and timestamp
    async fn create_exercise(&self, exercise: GeneratedExercise) -> AppResult<Exercise>;

    /// Look up an exercise
    async fn find_exercise(&self, id: Uuid) -> AppResult<Option<Exercise>>;

    /// Insert one submission
    async fn create_submission(&self, submission: NewSubmission) -> AppResult<Submission>;

    /// Submissions of one exercise, newest first
    async fn list_submissions(&self, exercise_id: Uuid) -> AppResult<Vec<Submission>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExerciseStore for PgStore {
    async fn create_exercise(&self, exercise: GeneratedExercise) -> AppResult<Exercise> {
        let mut tx = self.pool.begin().await?;
        let exercise = ExerciseRepository::create(&mut tx, &exercise).await?;
        tx.commit().await?;
        Ok(exercise)
    }

    async fn find_exercise(&self, id: Uuid) -> AppResult<Option<Exercise>> {
        let mut conn = self.pool.acquire().await?;
        ExerciseRepository::find_by_id(&mut conn, &id).await
    }

    async fn create_submission(&self, submission: NewSubmission) -> AppResult<Submission> {
        let mut tx = self.pool.begin().await?;
        let submission = SubmissionRepository::create(&mut tx, &submission).await?;
        tx.commit().await?;
        Ok(submission)
    }

    async fn list_submissions(&self, exercise_id: Uuid) -> AppResult<Vec<Submission>> {
        let mut conn = self.pool.acquire().await?;
        SubmissionRepository::list_by_exercise(&mut conn, &exercise_id).await
    }
}
