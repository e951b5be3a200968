use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::agent::openai::{ChatModel, OpenAiClient};
use crate::config::AppConfig;
use crate::platform::github::GitHubPlatform;
use crate::platform::Platform;
use crate::workflow::issue::IssueAgent;
use crate::workflow::relay::ChatRelay;
use crate::workflow::types::AgentDescriptor;

pub struct AppState {
    pub issue_agent: IssueAgent,
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(&config.openai));
        let platform: Arc<dyn Platform> = Arc::new(GitHubPlatform::new(&config.github));
        Self::with_backends(&config, model, platform)
    }

    /// Build the state around explicit model and platform backends.
    pub fn with_backends(
        config: &AppConfig,
        model: Arc<dyn ChatModel>,
        platform: Arc<dyn Platform>,
    ) -> Self {
        let issue_agent = IssueAgent::new(
            Arc::clone(&model),
            &config.openai.model,
            platform,
            config.agent.max_steps,
        );
        let relay = ChatRelay::new(model, &config.relay.model);

        Self {
            issue_agent,
            relay,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AgentRequest {
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub output: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/agents/issue", post(handle_issue))
        .route("/agents/chat", post(handle_chat))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

async fn list_agents() -> Json<Vec<AgentDescriptor>> {
    Json(vec![IssueAgent::descriptor(), ChatRelay::descriptor()])
}

async fn handle_issue(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AgentRequest>,
) -> Json<AgentResponse> {
    let output = state.issue_agent.handle(request.input.as_deref()).await;
    Json(AgentResponse { output })
}

async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AgentRequest>,
) -> Json<AgentResponse> {
    let output = state.relay.handle(request.input.as_deref()).await;
    Json(AgentResponse { output })
}
