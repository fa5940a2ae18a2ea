//! Submission repository

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewSubmission, Submission},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission
    pub async fn create(
        conn: &mut PgConnection,
        submission: &NewSubmission,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                id, exercise_id, code, language, status, stdout, stderr,
                duration_ms, score, tests_run, tests_failed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(submission.exercise_id)
        .bind(&submission.code)
        .bind(&submission.language)
        .bind(submission.status.as_str())
        .bind(&submission.stdout)
        .bind(&submission.stderr)
        .bind(submission.duration_ms)
        .bind(submission.score)
        .bind(submission.tests_run)
        .bind(submission.tests_failed)
        .fetch_one(&mut *conn)
        .await?;

        Ok(submission)
    }

    /// List the submissions of one exercise, newest first
    pub async fn list_by_exercise(
        conn: &mut PgConnection,
        exercise_id: &Uuid,
    ) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE exercise_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(exercise_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(submissions)
    }
}
