use std::sync::Arc;

use crate::agent::engine::{AgentEngine, Interaction};
use crate::agent::openai::ChatModel;
use crate::agent::prompt::ISSUE_AGENT_SYSTEM_PROMPT;
use crate::agent::tools::ToolRegistry;
use crate::platform::Platform;
use crate::workflow::types::{AgentDescriptor, Welcome};

pub const EMPTY_REQUEST_REPLY: &str = "Please provide details about the issue you want to create, including the repository (owner/repo), a title, and a description.";

/// Turns one free-text request into one reply, opening an issue on the way
/// when the model has enough to go on.
pub struct IssueAgent {
    engine: AgentEngine,
}

impl IssueAgent {
    pub fn new(
        model: Arc<dyn ChatModel>,
        model_name: &str,
        platform: Arc<dyn Platform>,
        max_steps: u32,
    ) -> Self {
        let tools = ToolRegistry::for_issues(platform);
        Self {
            engine: AgentEngine::new(model, model_name, tools, max_steps),
        }
    }

    pub fn descriptor() -> AgentDescriptor {
        AgentDescriptor {
            name: "issue-creator",
            path: "/agents/issue",
            description: "Creates GitHub issues from plain-language requests",
            welcome: Welcome {
                greeting: "Hi! Tell me which repository and what the issue is about, and I'll open it for you.",
                prompts: vec![
                    "Create an issue in acme/widgets titled 'Crash on startup' describing a null pointer on launch",
                ],
            },
        }
    }

    /// Resolve a request. Every failure is reported as text.
    pub async fn handle(&self, request: Option<&str>) -> String {
        let request = match request.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return EMPTY_REQUEST_REPLY.to_string(),
        };

        match self.engine.run(ISSUE_AGENT_SYSTEM_PROMPT, request).await {
            Ok(interaction) => {
                tracing::info!(
                    steps = interaction.steps,
                    tool_calls = interaction.tool_results.len(),
                    last_tool = interaction.tool_results.last().map(|r| r.tool_name.as_str()),
                    "Issue request resolved"
                );
                render_reply(&interaction)
            }
            Err(e) => {
                tracing::error!(error = %e, "Issue request failed");
                format!("An error occurred while processing your request: {}", e.message())
            }
        }
    }
}

/// Final reply for a finished interaction.
///
/// Without tool calls the model's text is returned as-is. Otherwise only the
/// last tool outcome counts: a success carrying a URL gets a link appended,
/// anything else is reported by its message alone.
pub fn render_reply(interaction: &Interaction) -> String {
    match interaction.last_outcome() {
        None => interaction.text.clone(),
        Some(outcome) => match (&outcome.url, outcome.success) {
            (Some(url), true) => format!("{} View it at: {url}", outcome.message),
            _ => outcome.message.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::engine::tests::{text_response, tool_response, ScriptedModel};
    use crate::agent::engine::ToolResult;
    use crate::agent::tools::create_issue::tests::FakePlatform;
    use crate::agent::tools::ToolOutcome;
    use crate::error::AppError;
    use serde_json::json;

    fn agent(model: Arc<ScriptedModel>, platform: FakePlatform) -> IssueAgent {
        IssueAgent::new(model, "gpt-4o", Arc::new(platform), 2)
    }

    fn interaction(outcomes: Vec<ToolOutcome>) -> Interaction {
        Interaction {
            text: "model text".to_string(),
            tool_results: outcomes
                .into_iter()
                .map(|outcome| ToolResult {
                    tool_name: "create_issue".to_string(),
                    outcome,
                })
                .collect(),
            steps: 1,
        }
    }

    #[test]
    fn test_render_without_tool_calls() {
        assert_eq!(render_reply(&interaction(vec![])), "model text");
    }

    #[test]
    fn test_render_success_with_url() {
        let reply = render_reply(&interaction(vec![ToolOutcome::succeeded(
            "Issue created successfully in acme/widgets!",
            Some("https://github.com/acme/widgets/issues/42".to_string()),
        )]));
        assert_eq!(
            reply,
            "Issue created successfully in acme/widgets! View it at: https://github.com/acme/widgets/issues/42"
        );
    }

    #[test]
    fn test_render_failure_uses_message() {
        let reply = render_reply(&interaction(vec![ToolOutcome::failed(
            "Failed to create issue: Not Found",
            "Not Found",
        )]));
        assert_eq!(reply, "Failed to create issue: Not Found");
        assert!(!reply.contains("View it at:"));
    }

    #[test]
    fn test_render_success_without_url_falls_through() {
        let reply = render_reply(&interaction(vec![ToolOutcome::succeeded("Created", None)]));
        assert_eq!(reply, "Created");
    }

    #[test]
    fn test_render_uses_last_outcome() {
        let reply = render_reply(&interaction(vec![
            ToolOutcome::succeeded("first", Some("https://example.test/1".to_string())),
            ToolOutcome::failed("Failed to create issue: second", "second"),
        ]));
        assert_eq!(reply, "Failed to create issue: second");

        let reply = render_reply(&interaction(vec![
            ToolOutcome::failed("Failed to create issue: first", "first"),
            ToolOutcome::succeeded("second", Some("https://example.test/2".to_string())),
        ]));
        assert_eq!(reply, "second View it at: https://example.test/2");
    }

    #[tokio::test]
    async fn test_empty_request_skips_model() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let agent = agent(Arc::clone(&model), FakePlatform::working());

        assert_eq!(agent.handle(None).await, EMPTY_REQUEST_REPLY);
        assert_eq!(agent.handle(Some("")).await, EMPTY_REQUEST_REPLY);
        assert_eq!(agent.handle(Some("  \n")).await, EMPTY_REQUEST_REPLY);
        assert_eq!(model.request_count(), 0);
    }

    #[tokio::test]
    async fn test_clarification_is_returned_verbatim() {
        let clarification = "Which repository should the issue go to (owner/repo)?";
        let model = Arc::new(ScriptedModel::new(vec![text_response(clarification)]));
        let agent = agent(Arc::clone(&model), FakePlatform::working());

        let reply = agent.handle(Some("Open an issue about the login bug")).await;
        assert_eq!(reply, clarification);
        assert_eq!(model.request_count(), 1);

        let requests = model.requests.lock().unwrap();
        assert_eq!(
            requests[0].messages[0].content.as_deref(),
            Some(ISSUE_AGENT_SYSTEM_PROMPT)
        );
        assert_eq!(
            requests[0].messages[1].content.as_deref(),
            Some("Open an issue about the login bug")
        );
    }

    #[tokio::test]
    async fn test_issue_created_end_to_end() {
        let model = Arc::new(ScriptedModel::new(vec![
            tool_response(&[(
                "create_issue",
                json!({
                    "repository": "acme/widgets",
                    "title": "Crash on startup",
                    "body": "The app crashes with a null pointer on launch."
                }),
            )]),
            text_response("I've created the issue."),
        ]));
        let agent = agent(model, FakePlatform::working());

        let reply = agent
            .handle(Some("Create an issue at https://github.com/acme/widgets titled 'Crash on startup' describing a null pointer on launch"))
            .await;
        assert_eq!(
            reply,
            "Issue created successfully in acme/widgets! View it at: https://github.com/acme/widgets/issues/42"
        );
    }

    #[tokio::test]
    async fn test_tool_failure_is_reported() {
        let model = Arc::new(ScriptedModel::new(vec![
            tool_response(&[("create_issue", json!({"repository": "widgets", "title": "t", "body": "b"}))]),
            text_response("Sorry, that failed."),
        ]));
        let agent = agent(model, FakePlatform::working());

        let reply = agent.handle(Some("file it in widgets")).await;
        assert!(reply.starts_with("Failed to create issue: "));
        assert!(reply.contains("Invalid repository format"));
        assert!(!reply.contains("View it at:"));
    }

    #[tokio::test]
    async fn test_model_failure_becomes_text() {
        let model = Arc::new(ScriptedModel::new(vec![Err(AppError::ModelInvocation(
            "API returned 500 Internal Server Error: boom".to_string(),
        ))]));
        let agent = agent(model, FakePlatform::working());

        let reply = agent.handle(Some("anything")).await;
        assert_eq!(
            reply,
            "An error occurred while processing your request: API returned 500 Internal Server Error: boom"
        );
    }
}
