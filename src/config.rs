//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once in `main` and handed to the application state; nothing
//! reads the environment after startup.

use std::env;

use crate::constants::{
    DEFAULT_APP_NAME, DEFAULT_AZURE_OPENAI_API_VERSION, DEFAULT_AZURE_OPENAI_TIMEOUT_SECS,
    DEFAULT_DATABASE_CONNECT_ATTEMPTS, DEFAULT_DATABASE_CONNECT_RETRY_SECS,
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_ENVIRONMENT,
    DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TASK_QUEUE,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub azure: AzureOpenAiConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub app_name: String,
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Startup connection attempts before the process gives up
    pub connect_attempts: u32,
    /// Fixed delay between startup attempts
    pub connect_retry_secs: u64,
}

/// Redis configuration for the task broker and result backend
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub broker_url: Option<String>,
    pub result_backend: Option<String>,
    pub queue: String,
}

/// Azure OpenAI chat-completion settings. All of endpoint, key and deployment
/// must be present for the integration to be enabled.
#[derive(Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
    pub timeout_secs: u64,
}

/// Complete credentials, present only when the integration is enabled
#[derive(Debug, Clone)]
pub struct AzureCredentials {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            server: ServerConfig::load(&var)?,
            database: DatabaseConfig::load(&var)?,
            redis: RedisConfig::load(&var),
            azure: AzureOpenAiConfig::load(&var)?,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

impl ServerConfig {
    fn load<F: Fn(&str) -> Option<String>>(var: &F) -> Result<Self, ConfigError> {
        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        };

        Ok(Self {
            app_name: var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            environment: var("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or(var, "BACKEND_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format,
        })
    }
}

impl DatabaseConfig {
    fn load<F: Fn(&str) -> Option<String>>(var: &F) -> Result<Self, ConfigError> {
        let connect_attempts =
            parse_or(var, "DATABASE_CONNECT_ATTEMPTS", DEFAULT_DATABASE_CONNECT_ATTEMPTS)?;
        if connect_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_CONNECT_ATTEMPTS".to_string(),
            ));
        }

        Ok(Self {
            url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_or(
                var,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            connect_attempts,
            connect_retry_secs: parse_or(
                var,
                "DATABASE_CONNECT_RETRY_SECS",
                DEFAULT_DATABASE_CONNECT_RETRY_SECS,
            )?,
        })
    }
}

impl RedisConfig {
    fn load<F: Fn(&str) -> Option<String>>(var: &F) -> Self {
        Self {
            url: var("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            broker_url: var("TASK_BROKER_URL"),
            result_backend: var("TASK_RESULT_BACKEND"),
            queue: var("TASK_QUEUE").unwrap_or_else(|| DEFAULT_TASK_QUEUE.to_string()),
        }
    }

    /// URL tasks are pushed to
    pub fn broker_url(&self) -> &str {
        self.broker_url.as_deref().unwrap_or(&self.url)
    }

    /// URL task results are written to
    pub fn result_backend_url(&self) -> &str {
        self.result_backend.as_deref().unwrap_or(&self.url)
    }
}

impl AzureOpenAiConfig {
    fn load<F: Fn(&str) -> Option<String>>(var: &F) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: var("AZURE_OPENAI_ENDPOINT"),
            api_key: var("AZURE_OPENAI_API_KEY"),
            deployment: var("AZURE_OPENAI_DEPLOYMENT"),
            api_version: var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_AZURE_OPENAI_API_VERSION.to_string()),
            timeout_secs: parse_or(
                var,
                "AZURE_OPENAI_TIMEOUT_SECS",
                DEFAULT_AZURE_OPENAI_TIMEOUT_SECS,
            )?,
        })
    }

    /// Credentials when endpoint, key and deployment are all set
    pub fn credentials(&self) -> Option<AzureCredentials> {
        Some(AzureCredentials {
            endpoint: self.endpoint.clone()?,
            api_key: self.api_key.clone()?,
            deployment: self.deployment.clone()?,
            api_version: self.api_version.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

// Hand-written so the API key never reaches the logs.
impl std::fmt::Debug for AzureOpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.app_name, "Learn Code Fast API");
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.database.connect_attempts, 20);
        assert_eq!(config.database.connect_retry_secs, 1);
        assert_eq!(config.redis.queue, "default");
        assert_eq!(config.azure.api_version, "2024-02-15-preview");
        assert!(config.azure.credentials().is_none());
    }

    #[test]
    fn test_broker_and_backend_fall_back_to_redis_url() {
        let config = load(&[("REDIS_URL", "redis://cache:6379/1")]).unwrap();
        assert_eq!(config.redis.broker_url(), "redis://cache:6379/1");
        assert_eq!(config.redis.result_backend_url(), "redis://cache:6379/1");

        let config = load(&[
            ("REDIS_URL", "redis://cache:6379/1"),
            ("TASK_BROKER_URL", "redis://broker:6379/0"),
            ("TASK_RESULT_BACKEND", "redis://results:6379/2"),
        ])
        .unwrap();
        assert_eq!(config.redis.broker_url(), "redis://broker:6379/0");
        assert_eq!(config.redis.result_backend_url(), "redis://results:6379/2");
    }

    #[test]
    fn test_credentials_require_all_three_values() {
        let partial = load(&[
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "secret"),
        ])
        .unwrap();
        assert!(partial.azure.credentials().is_none());

        let blank = load(&[
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "secret"),
            ("AZURE_OPENAI_DEPLOYMENT", "   "),
        ])
        .unwrap();
        assert!(blank.azure.credentials().is_none());

        let full = load(&[
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "secret"),
            ("AZURE_OPENAI_DEPLOYMENT", "gpt-4o-mini"),
        ])
        .unwrap();
        let creds = full.azure.credentials().unwrap();
        assert_eq!(creds.deployment, "gpt-4o-mini");
        assert_eq!(creds.api_version, "2024-02-15-preview");
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(matches!(
            load(&[("BACKEND_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "BACKEND_PORT"
        ));
        assert!(load(&[("DATABASE_CONNECT_ATTEMPTS", "0")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = load(&[("AZURE_OPENAI_API_KEY", "super-secret")]).unwrap();
        let rendered = format!("{:?}", config.azure);
        assert!(!rendered.contains("super-secret"));
    }
}
