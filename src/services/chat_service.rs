//! Tutoring chat service

use crate::{
    constants::{CHAT_MAX_TOKENS, CHAT_TEMPERATURE},
    db::ExerciseStore,
    error::AppResult,
    handlers::chat::{request::ChatRequest, response::ChatResponse},
    llm::{ChatCompletions, ChatMessage, CompletionRequest},
    models::Exercise,
};

const TUTOR_SYSTEM_PROMPT: &str = "You are a patient programming tutor. \
Guide the learner with hints, questions and small examples. \
Never hand over a complete solution to the current exercise. Keep answers short and concrete.";

/// Tutoring chat service
pub struct ChatService;

impl ChatService {
    /// Produce one tutor reply for the learner's message
    pub async fn ask(
        store: &dyn ExerciseStore,
        llm: Option<&dyn ChatCompletions>,
        payload: ChatRequest,
    ) -> AppResult<ChatResponse> {
        let exercise = match payload.exercise_id {
            Some(id) => {
                let exercise = store.find_exercise(id).await?;
                if exercise.is_none() {
                    tracing::debug!(exercise_id = %id, "Chat references an unknown exercise");
                }
                exercise
            }
            None => None,
        };

        let Some(llm) = llm else {
            return Ok(ChatResponse {
                response: Self::fallback_reply(
                    exercise.as_ref(),
                    payload.conversation_history.len(),
                ),
                tokens_used: 0,
            });
        };

        let mut messages = Vec::with_capacity(payload.conversation_history.len() + 2);
        messages.push(ChatMessage::system(Self::system_prompt(exercise.as_ref())));
        messages.extend(payload.conversation_history);
        messages.push(ChatMessage::user(payload.message));

        let completion = llm
            .complete(CompletionRequest {
                messages,
                temperature: CHAT_TEMPERATURE,
                max_tokens: CHAT_MAX_TOKENS,
                json_object: false,
            })
            .await?;

        Ok(ChatResponse {
            response: completion.content,
            tokens_used: completion.total_tokens.unwrap_or(0),
        })
    }

    /// Tutor persona, with the exercise attached when there is one
    pub fn system_prompt(exercise: Option<&Exercise>) -> String {
        match exercise {
            Some(exercise) => format!(
                "{}\n\nThe learner is working on this exercise:\n\
                 Title: {}\nDifficulty: {}\nLanguage: {}\n\n{}",
                TUTOR_SYSTEM_PROMPT,
                exercise.title,
                exercise.difficulty(),
                exercise.language,
                exercise.prompt_markdown
            ),
            None => TUTOR_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Canned reply used when no model is configured
    pub fn fallback_reply(exercise: Option<&Exercise>, prior_turns: usize) -> String {
        let subject = match exercise {
            Some(exercise) => format!("\"{}\"", exercise.title),
            None => "your exercise".to_string(),
        };
        let turns = match prior_turns {
            0 => "This is the start of our conversation.".to_string(),
            1 => "We have exchanged 1 message so far.".to_string(),
            n => format!("We have exchanged {} messages so far.", n),
        };

        format!(
            "The AI tutor is not configured right now, but let's keep working on {}. {} \
             Try breaking the problem into smaller steps, write down the expected output for a \
             simple input, and run your code after each change.",
            subject, turns
        )
    }

    /// Split a reply into chunks of at most `size` characters
    pub fn chunk_reply(text: &str, size: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(size.max(1))
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}
