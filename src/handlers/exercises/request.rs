//! Exercise request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        DEFAULT_EXERCISE_LANGUAGE, MAX_LANGUAGE_LENGTH, MAX_SOURCE_CODE_SIZE, MAX_TOPIC_LENGTH,
    },
    models::Difficulty,
};

/// Generate exercise request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateExerciseRequest {
    /// Free-form topic, e.g. "strings"
    #[validate(length(max = MAX_TOPIC_LENGTH))]
    pub topic: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = MAX_LANGUAGE_LENGTH))]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_EXERCISE_LANGUAGE.to_string()
}

/// Run or submit request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CodeExecutionRequest {
    #[validate(length(max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,

    #[validate(length(min = 1, max = MAX_LANGUAGE_LENGTH))]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateExerciseRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.topic, None);
        assert_eq!(req.difficulty, Difficulty::Easy);
        assert_eq!(req.language, "python");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_generate_request_rejects_unknown_difficulty() {
        let result = serde_json::from_str::<GenerateExerciseRequest>(r#"{"difficulty":"extreme"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_language_is_invalid() {
        let req = CodeExecutionRequest {
            code: "print(1)".to_string(),
            language: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
