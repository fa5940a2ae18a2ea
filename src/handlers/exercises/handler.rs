//! Exercise handler implementations

use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    extractors::{AppJson, AppPath},
    services::{ExerciseService, GenerationService},
    state::AppState,
};

use super::{
    request::{CodeExecutionRequest, GenerateExerciseRequest},
    response::{ExerciseResponse, RunResponse, SubmissionsListResponse, SubmitResponse},
};

/// Generate an exercise and persist it
pub async fn generate_exercise(
    State(state): State<AppState>,
    AppJson(payload): AppJson<GenerateExerciseRequest>,
) -> AppResult<Json<ExerciseResponse>> {
    payload.validate()?;

    let generated = GenerationService::generate(state.llm(), &payload).await?;
    let exercise = ExerciseService::create_exercise(state.store(), generated).await?;

    Ok(Json(exercise))
}

/// Get exercise by ID
pub async fn get_exercise(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ExerciseResponse>> {
    let exercise = ExerciseService::get_exercise(state.store(), &id).await?;
    Ok(Json(exercise))
}

/// List the submissions of an exercise, newest first
pub async fn list_submissions(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let submissions = ExerciseService::list_submissions(state.store(), &id).await?;

    Ok(Json(SubmissionsListResponse {
        total: submissions.len(),
        submissions,
    }))
}

/// Run code against an exercise
pub async fn run_code(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<CodeExecutionRequest>,
) -> AppResult<Json<RunResponse>> {
    payload.validate()?;

    let result = ExerciseService::run(state.store(), &id, payload).await?;
    Ok(Json(result))
}

/// Run and score code against an exercise
pub async fn submit_code(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<CodeExecutionRequest>,
) -> AppResult<Json<SubmitResponse>> {
    payload.validate()?;

    let result = ExerciseService::submit(state.store(), &id, payload).await?;
    Ok(Json(result))
}
