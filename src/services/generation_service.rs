//! Exercise generation
//!
//! With a chat-completion client the exercise comes from the model; without one it is
//! synthesized from a fixed template. Generation has no side effects, persisting the
//! result is the caller's job.

use serde_json::{Map, Value};

use crate::{
    constants::{DEFAULT_EXERCISE_TOPIC, EXERCISE_MAX_TOKENS, EXERCISE_TEMPERATURE},
    error::{AppError, AppResult},
    handlers::exercises::request::GenerateExerciseRequest,
    llm::{ChatCompletions, ChatMessage, CompletionRequest},
    models::{Difficulty, GeneratedExercise},
};

const GENERATION_SYSTEM_PROMPT: &str = "You create concise coding exercises \
that can be solved in about 5 minutes. \
Return a JSON object with fields: title (string), language (string), \
difficulty (one of easy, medium, hard), \
prompt_markdown (a short markdown task description with one example), \
starter_code (a minimal code snippet with TODOs). Do not include the full solution.";

/// Exercise generation service
pub struct GenerationService;

impl GenerationService {
    /// Generate an exercise, through the model when one is configured
    pub async fn generate(
        llm: Option<&dyn ChatCompletions>,
        request: &GenerateExerciseRequest,
    ) -> AppResult<GeneratedExercise> {
        let topic = normalized_topic(request.topic.as_deref());

        let Some(llm) = llm else {
            tracing::info!(
                language = %request.language,
                difficulty = %request.difficulty,
                "No chat-completion credentials, using exercise template"
            );
            return Ok(Self::template(topic, request.difficulty, &request.language));
        };

        let completion = llm
            .complete(CompletionRequest {
                messages: vec![
                    ChatMessage::system(GENERATION_SYSTEM_PROMPT),
                    ChatMessage::user(user_instruction(
                        topic,
                        request.difficulty,
                        &request.language,
                    )),
                ],
                temperature: EXERCISE_TEMPERATURE,
                max_tokens: EXERCISE_MAX_TOKENS,
                json_object: true,
            })
            .await?;

        let exercise = Self::parse_generated(&completion.content, topic, request)?;
        tracing::info!(
            language = %exercise.language,
            difficulty = %exercise.difficulty,
            "Generated exercise with chat completion"
        );
        Ok(exercise)
    }

    /// Deterministic exercise used when no model is configured
    pub fn template(
        topic: Option<&str>,
        difficulty: Difficulty,
        language: &str,
    ) -> GeneratedExercise {
        let topic = topic.unwrap_or(DEFAULT_EXERCISE_TOPIC);

        GeneratedExercise {
            title: format!("{} {} practice", difficulty.label(), topic),
            language: language.to_string(),
            difficulty,
            prompt_markdown: template_prompt(topic, difficulty, language),
            starter_code: starter_code(language),
        }
    }

    /// Parse the model's JSON reply. Unparseable text is an error; an empty reply
    /// counts as `{}`, and missing or blank fields are filled from the request and
    /// the template.
    pub fn parse_generated(
        raw: &str,
        topic: Option<&str>,
        request: &GenerateExerciseRequest,
    ) -> AppResult<GeneratedExercise> {
        let raw = match raw.trim() {
            "" => "{}",
            trimmed => trimmed,
        };
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            AppError::BadUpstreamResponse(format!("exercise is not valid JSON: {}", e))
        })?;
        let Value::Object(fields) = value else {
            return Err(AppError::BadUpstreamResponse(
                "exercise is not a JSON object".to_string(),
            ));
        };

        let difficulty = text_field(&fields, "difficulty")
            .and_then(|d| Difficulty::from_str(&d))
            .unwrap_or(request.difficulty);
        let fallback = Self::template(topic, difficulty, &request.language);

        Ok(GeneratedExercise {
            title: text_field(&fields, "title").unwrap_or(fallback.title),
            language: text_field(&fields, "language").unwrap_or(fallback.language),
            difficulty,
            prompt_markdown: text_field(&fields, "prompt_markdown")
                .or_else(|| text_field(&fields, "explanation"))
                .unwrap_or(fallback.prompt_markdown),
            starter_code: text_field(&fields, "starter_code").unwrap_or(fallback.starter_code),
        })
    }
}

fn normalized_topic(topic: Option<&str>) -> Option<&str> {
    topic.map(str::trim).filter(|t| !t.is_empty())
}

fn user_instruction(topic: Option<&str>, difficulty: Difficulty, language: &str) -> String {
    match topic {
        Some(topic) => format!(
            "Create one {} coding exercise in {} about {}. Provide only the requested JSON fields.",
            difficulty, language, topic
        ),
        None => format!(
            "Create one {} coding exercise in {}. Provide only the requested JSON fields.",
            difficulty, language
        ),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn template_prompt(topic: &str, difficulty: Difficulty, language: &str) -> String {
    let scope = match difficulty {
        Difficulty::Easy => "Keep it to a single function and a handful of lines.",
        Difficulty::Medium => "Think about edge cases such as empty input before you start.",
        Difficulty::Hard => "Aim for a solution that stays efficient on large inputs.",
    };

    format!(
        "## {topic} practice\n\n\
         Write a function `solution` in **{language}** that exercises your {topic} skills.\n\n\
         - Difficulty: {difficulty}\n\
         - {scope}\n\n\
         Start from the starter code, replace the TODO and run it when you are ready."
    )
}

fn starter_code(language: &str) -> String {
    let code = match language.trim().to_ascii_lowercase().as_str() {
        "python" | "py" => "def solution(data):\n    # TODO: implement\n    pass\n",
        "javascript" | "js" | "node" => {
            "function solution(data) {\n  // TODO: implement\n}\n\nmodule.exports = { solution };\n"
        }
        "typescript" | "ts" => {
            "export function solution(data: unknown): unknown {\n  \
             // TODO: implement\n  return undefined;\n}\n"
        }
        "rust" | "rs" => {
            "pub fn solution(data: &str) -> String {\n    // TODO: implement\n    todo!()\n}\n"
        }
        "go" | "golang" => {
            "package main\n\nfunc solution(data string) string {\n\t\
             // TODO: implement\n\treturn \"\"\n}\n"
        }
        "java" => {
            "class Solution {\n    static String solution(String data) {\n        \
             // TODO: implement\n        return \"\";\n    }\n}\n"
        }
        "c" => {
            "const char *solution(const char *data) {\n    \
             /* TODO: implement */\n    return data;\n}\n"
        }
        "cpp" | "c++" => {
            "#include <string>\n\nstd::string solution(const std::string& data) {\n    \
             // TODO: implement\n    return data;\n}\n"
        }
        _ => return format!("// TODO: write a `solution` function in {}\n", language),
    };
    code.to_string()
}
