//! Service information handlers

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub environment: String,
    pub azure_openai_endpoint: Option<String>,
}

/// Public view of the configuration. Never includes the API key.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub app_name: String,
    pub environment: String,
    pub azure_openai_endpoint: Option<String>,
    pub azure_openai_deployment: Option<String>,
}

async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let config = state.config();
    Json(RootResponse {
        message: format!("Welcome to {}", config.server.app_name),
        environment: config.server.environment.clone(),
        azure_openai_endpoint: config.azure.endpoint.clone(),
    })
}

async fn public_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = state.config();
    Json(ConfigResponse {
        app_name: config.server.app_name.clone(),
        environment: config.server.environment.clone(),
        azure_openai_endpoint: config.azure.endpoint.clone(),
        azure_openai_deployment: config.azure.deployment.clone(),
    })
}

/// Root and config routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/config", get(public_config))
}
