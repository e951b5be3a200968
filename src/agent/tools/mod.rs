pub mod create_issue;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::agent::openai::ToolDefinition;
use crate::platform::Platform;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn definition(&self) -> ToolDefinition;
    /// Run the tool. Failures are reported through the outcome, never raised.
    async fn execute(&self, input: serde_json::Value) -> ToolOutcome;
}

/// Result of a tool invocation, relayed to the model and to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    pub fn succeeded(message: impl Into<String>, url: Option<String>) -> Self {
        Self {
            success: true,
            url,
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// The single-tool registry used by the issue agent.
    pub fn for_issues(platform: Arc<dyn Platform>) -> Self {
        Self::new(vec![Box::new(create_issue::CreateIssueTool::new(platform))])
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }
}
