//! Exercise service
//!
//! Persistence of generated exercises plus the run and submit flows. Every run or
//! submit first resolves the exercise, so submissions never reference a missing one.

use uuid::Uuid;

use crate::{
    db::ExerciseStore,
    error::{AppError, AppResult},
    handlers::exercises::{
        request::CodeExecutionRequest,
        response::{
            ExerciseResponse, RunResponse, SubmissionDetails, SubmissionResponse, SubmitResponse,
        },
    },
    models::{Exercise, GeneratedExercise, NewSubmission, SubmissionStatus},
    services::execution_service::{ExecutionService, RunOutcome},
};

/// Exercise service for business logic
pub struct ExerciseService;

impl ExerciseService {
    /// Persist a generated exercise
    pub async fn create_exercise(
        store: &dyn ExerciseStore,
        exercise: GeneratedExercise,
    ) -> AppResult<ExerciseResponse> {
        let exercise = store.create_exercise(exercise).await?;
        tracing::info!(exercise_id = %exercise.id, title = %exercise.title, "Exercise created");
        Ok(exercise.into())
    }

    /// Get exercise by ID
    pub async fn get_exercise(store: &dyn ExerciseStore, id: &Uuid) -> AppResult<ExerciseResponse> {
        Ok(Self::find_or_not_found(store, id).await?.into())
    }

    /// List the submissions recorded for an exercise
    pub async fn list_submissions(
        store: &dyn ExerciseStore,
        id: &Uuid,
    ) -> AppResult<Vec<SubmissionResponse>> {
        let exercise = Self::find_or_not_found(store, id).await?;
        let submissions = store.list_submissions(exercise.id).await?;
        Ok(submissions.into_iter().map(Into::into).collect())
    }

    /// Run code against an exercise and record a `ran` submission
    pub async fn run(
        store: &dyn ExerciseStore,
        id: &Uuid,
        payload: CodeExecutionRequest,
    ) -> AppResult<RunResponse> {
        let exercise = Self::find_or_not_found(store, id).await?;
        let run = Self::run_and_record(store, &exercise, &payload).await?;

        Ok(RunResponse {
            stdout: run.stdout,
            stderr: run.stderr,
            duration_ms: run.duration_ms,
        })
    }

    /// Run, score, and record the scored outcome as a second submission
    pub async fn submit(
        store: &dyn ExerciseStore,
        id: &Uuid,
        payload: CodeExecutionRequest,
    ) -> AppResult<SubmitResponse> {
        let exercise = Self::find_or_not_found(store, id).await?;
        let run = Self::run_and_record(store, &exercise, &payload).await?;
        let score = ExecutionService::score(&run);

        let submission = store
            .create_submission(NewSubmission {
                exercise_id: exercise.id,
                code: payload.code,
                language: payload.language,
                status: score.status,
                stdout: run.stdout.clone(),
                stderr: run.stderr.clone(),
                duration_ms: run.duration_ms,
                score: Some(score.score),
                tests_run: Some(score.tests_run),
                tests_failed: Some(score.tests_failed),
            })
            .await?;

        tracing::info!(
            exercise_id = %exercise.id,
            submission_id = %submission.id,
            status = %score.status,
            score = score.score,
            "Submission scored"
        );

        Ok(SubmitResponse {
            status: score.status,
            score: score.score,
            stdout: run.stdout,
            stderr: run.stderr,
            duration_ms: run.duration_ms,
            details: SubmissionDetails {
                tests_run: score.tests_run,
                tests_failed: score.tests_failed,
            },
        })
    }

    async fn find_or_not_found(store: &dyn ExerciseStore, id: &Uuid) -> AppResult<Exercise> {
        store
            .find_exercise(*id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))
    }

    async fn run_and_record(
        store: &dyn ExerciseStore,
        exercise: &Exercise,
        payload: &CodeExecutionRequest,
    ) -> AppResult<RunOutcome> {
        let run = ExecutionService::run_code(&payload.code, &payload.language);

        let submission = store
            .create_submission(NewSubmission {
                exercise_id: exercise.id,
                code: payload.code.clone(),
                language: payload.language.clone(),
                status: SubmissionStatus::Ran,
                stdout: run.stdout.clone(),
                stderr: run.stderr.clone(),
                duration_ms: run.duration_ms,
                score: None,
                tests_run: None,
                tests_failed: None,
            })
            .await?;

        tracing::info!(
            exercise_id = %exercise.id,
            submission_id = %submission.id,
            duration_ms = run.duration_ms,
            "Code run recorded"
        );

        Ok(run)
    }
}
