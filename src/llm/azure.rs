//! Azure OpenAI chat-completion client
//!
//! One HTTP request per call, no retries. Usage and latency are logged; the API key
//! and message contents are not.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{ChatCompletions, ChatMessage, Completion, CompletionRequest};
use crate::{
    config::AzureCredentials,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct AzureOpenAi {
    client: reqwest::Client,
    api_key: String,
    url: String,
    deployment: String,
}

impl AzureOpenAi {
    /// Build a client for the configured deployment
    pub fn new(credentials: AzureCredentials) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(credentials.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: completions_url(&credentials),
            api_key: credentials.api_key,
            deployment: credentials.deployment,
        })
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }
}

fn completions_url(credentials: &AzureCredentials) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        credentials.endpoint.trim_end_matches('/'),
        credentials.deployment,
        credentials.api_version
    )
}

#[async_trait]
impl ChatCompletions for AzureOpenAi {
    #[instrument(
        level = "info",
        skip(self, request),
        fields(deployment = %self.deployment, messages = request.messages.len())
    )]
    async fn complete(&self, request: CompletionRequest) -> AppResult<Completion> {
        let body = ChatCompletionRequest {
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_object.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let started = Instant::now();
        let res = self
            .client
            .post(&self.url)
            .header(USER_AGENT, concat!("learn-code-fast/", env!("CARGO_PKG_VERSION")))
            .header(CONTENT_TYPE, "application/json")
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let msg = extract_error_message(&body).unwrap_or(body);
            return Err(AppError::Upstream(format!("HTTP {}: {}", status, msg)));
        }

        let body: ChatCompletionResponse = res.json().await.map_err(|e| {
            AppError::BadUpstreamResponse(format!("unexpected completion payload: {}", e))
        })?;

        let total_tokens = body.usage.and_then(|u| u.total_tokens);
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        info!(
            latency_ms = started.elapsed().as_millis() as u64,
            total_tokens = ?total_tokens,
            response_chars = content.chars().count(),
            "Chat completion finished"
        );

        Ok(Completion {
            content,
            total_tokens,
        })
    }
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResp,
}

#[derive(Deserialize)]
struct ChatMessageResp {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: Option<u32>,
}

/// Pull `error.message` out of an API error body
fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Wrapper {
        error: Inner,
    }
    #[derive(Deserialize)]
    struct Inner {
        message: String,
    }

    serde_json::from_str::<Wrapper>(body)
        .ok()
        .map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;

    fn credentials(endpoint: &str) -> AzureCredentials {
        AzureCredentials {
            endpoint: endpoint.to_string(),
            api_key: "key".to_string(),
            deployment: "tutor".to_string(),
            api_version: "2024-02-15-preview".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_completions_url() {
        let expected = "https://example.openai.azure.com/openai/deployments/tutor/chat/completions\
                        ?api-version=2024-02-15-preview";
        assert_eq!(completions_url(&credentials("https://example.openai.azure.com")), expected);
        assert_eq!(completions_url(&credentials("https://example.openai.azure.com/")), expected);
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let body = ChatCompletionRequest {
            messages: &messages,
            temperature: 0.5,
            max_tokens: 100,
            response_format: Some(ResponseFormat { kind: "json_object" }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 100);
        assert_eq!(json["response_format"]["type"], "json_object");

        let plain = ChatCompletionRequest {
            messages: &messages,
            temperature: 0.5,
            max_tokens: 100,
            response_format: None,
        };
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_response_parsing_tolerates_missing_usage() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#,
        )
        .unwrap();
        assert!(body.usage.is_none());
        assert_eq!(body.choices[0].message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":{"code":"429","message":"Rate limit reached"}}"#),
            Some("Rate limit reached".to_string())
        );
        assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::Assistant).unwrap(), "\"assistant\"");
    }
}
