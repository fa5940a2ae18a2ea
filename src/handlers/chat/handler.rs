//! Chat handler implementations

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    Json,
};
use futures::{stream, Stream};
use validator::Validate;

use crate::{
    constants::{CHAT_STREAM_CHUNK_CHARS, CHAT_STREAM_DONE_MARKER},
    error::{AppError, AppResult},
    extractors::AppJson,
    services::ChatService,
    state::AppState,
    utils::validate_not_blank,
};

use super::{
    request::ChatRequest,
    response::{ChatResponse, StreamChunk},
};

/// Answer a chat message in one response
pub async fn ask_batch(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    validate(&payload)?;

    let reply = ChatService::ask(state.store(), state.llm(), payload).await?;
    Ok(Json(reply))
}

/// Answer a chat message as server-sent events: one `message` event per chunk of
/// the reply, then a `done` event
pub async fn ask_stream(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ChatRequest>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    validate(&payload)?;

    let reply = ChatService::ask(state.store(), state.llm(), payload).await?;

    let mut events = ChatService::chunk_reply(&reply.response, CHAT_STREAM_CHUNK_CHARS)
        .into_iter()
        .map(|content| Event::default().event("message").json_data(StreamChunk { content }))
        .collect::<Result<Vec<_>, _>>()
        .map_err(anyhow::Error::from)?;
    events.push(Event::default().event("done").data(CHAT_STREAM_DONE_MARKER));

    tracing::debug!(events = events.len(), "Streaming chat reply");

    Ok(Sse::new(stream::iter(events.into_iter().map(Ok))))
}

fn validate(payload: &ChatRequest) -> AppResult<()> {
    payload.validate()?;
    validate_not_blank(&payload.message)
        .map_err(|e| AppError::Validation(format!("message: {}", e)))
}
