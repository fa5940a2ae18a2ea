//! Job handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{error::AppResult, extractors::AppJson, services::JobService, state::AppState};

use super::{request::EchoRequest, response::EchoResponse};

/// Enqueue the echo task. A bare POST without a body echoes the default message.
pub async fn enqueue_echo(
    State(state): State<AppState>,
    payload: Option<AppJson<EchoRequest>>,
) -> AppResult<Json<EchoResponse>> {
    let payload = payload.map(|AppJson(p)| p).unwrap_or_default();
    payload.validate()?;

    let job = JobService::enqueue_echo(state.tasks(), payload.message).await?;
    Ok(Json(job))
}
