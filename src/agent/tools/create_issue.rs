use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::agent::openai::ToolDefinition;
use crate::agent::tools::{Tool, ToolOutcome};
use crate::error::{AppError, Result};
use crate::platform::types::{CreatedIssue, NewIssue, RepoRef};
use crate::platform::Platform;

pub const CREATE_ISSUE: &str = "create_issue";

#[derive(Debug, Deserialize)]
struct CreateIssueArgs {
    repository: String,
    title: String,
    body: String,
}

pub struct CreateIssueTool {
    platform: Arc<dyn Platform>,
}

impl CreateIssueTool {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    async fn create(&self, input: serde_json::Value) -> Result<(String, CreatedIssue)> {
        self.platform.ensure_credentials()?;

        let args: CreateIssueArgs = serde_json::from_value(input)
            .map_err(|e| AppError::Validation(format!("Invalid tool arguments: {e}")))?;
        let repo = RepoRef::parse(&args.repository)?;

        let created = self
            .platform
            .create_issue(
                &repo,
                &NewIssue {
                    title: args.title,
                    body: args.body,
                },
            )
            .await?;

        Ok((args.repository, created))
    }
}

#[async_trait]
impl Tool for CreateIssueTool {
    fn name(&self) -> &str {
        CREATE_ISSUE
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            CREATE_ISSUE,
            "Create a new GitHub issue. Only call this when the repository and a title are known; otherwise ask the user for the missing details instead.",
            json!({
                "type": "object",
                "properties": {
                    "repository": {
                        "type": "string",
                        "description": "The repository in owner/repo format, e.g. octocat/hello-world"
                    },
                    "title": {
                        "type": "string",
                        "description": "A short, descriptive issue title"
                    },
                    "body": {
                        "type": "string",
                        "description": "The issue description, formatted as markdown"
                    }
                },
                "required": ["repository", "title", "body"]
            }),
        )
    }

    async fn execute(&self, input: serde_json::Value) -> ToolOutcome {
        match self.create(input).await {
            Ok((repository, created)) => ToolOutcome::succeeded(
                format!("Issue created successfully in {repository}!"),
                Some(created.html_url),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Issue creation failed");
                let error = e.message();
                ToolOutcome::failed(format!("Failed to create issue: {error}"), error)
            }
        }
    }
}
