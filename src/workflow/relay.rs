use std::sync::Arc;

use crate::agent::openai::{ChatMessage, ChatModel, ChatRequest};
use crate::error::Result;
use crate::workflow::types::{AgentDescriptor, Welcome};

pub const DEFAULT_PROMPT: &str = "Say this is a test";
pub const EMPTY_COMPLETION_REPLY: &str = "Something went wrong";

/// Forwards a request to the chat-completion API and returns the reply.
pub struct ChatRelay {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl ChatRelay {
    pub fn new(model: Arc<dyn ChatModel>, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
        }
    }

    pub fn descriptor() -> AgentDescriptor {
        AgentDescriptor {
            name: "chat",
            path: "/agents/chat",
            description: "Relays a message to the language model and returns its reply",
            welcome: Welcome {
                greeting: "Hello! Send me a message and I'll pass it on to the model.",
                prompts: vec![DEFAULT_PROMPT],
            },
        }
    }

    /// Relay a request. Every failure is reported as text.
    pub async fn handle(&self, request: Option<&str>) -> String {
        let content = match request.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_PROMPT,
        };

        match self.complete(content).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Chat relay failed");
                format!("An error occurred while processing your request: {}", e.message())
            }
        }
    }

    async fn complete(&self, content: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage::user(content)],
            tools: Vec::new(),
        };

        let response = self.model.complete(&request).await?;

        let reply = response
            .first_message()
            .and_then(|m| m.content.clone())
            .filter(|c| !c.is_empty());

        Ok(match reply {
            Some(text) => text,
            None => {
                tracing::warn!(response_id = %response.id, "Completion had no usable content");
                EMPTY_COMPLETION_REPLY.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::engine::tests::{text_response, ScriptedModel};
    use crate::agent::openai::{ChatResponse, Role};
    use crate::error::AppError;

    #[tokio::test]
    async fn test_empty_input_uses_default_prompt() {
        let model = Arc::new(ScriptedModel::new(vec![
            text_response("This is a test."),
            text_response("This is a test."),
        ]));
        let relay = ChatRelay::new(Arc::clone(&model) as Arc<dyn ChatModel>, "gpt-4o-mini");

        assert_eq!(relay.handle(None).await, "This is a test.");
        assert_eq!(relay.handle(Some("   ")).await, "This is a test.");

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests.iter() {
            assert_eq!(request.model, "gpt-4o-mini");
            assert!(request.tools.is_empty());
            assert_eq!(request.messages.len(), 1);
            assert_eq!(request.messages[0].role, Role::User);
            assert_eq!(request.messages[0].content.as_deref(), Some(DEFAULT_PROMPT));
        }
    }

    #[tokio::test]
    async fn test_input_is_forwarded() {
        let model = Arc::new(ScriptedModel::new(vec![text_response("Paris")]));
        let relay = ChatRelay::new(Arc::clone(&model) as Arc<dyn ChatModel>, "gpt-4o-mini");

        let reply = relay.handle(Some("  Capital of France?\n")).await;
        assert_eq!(reply, "Paris");
        assert_eq!(
            model.requests.lock().unwrap()[0].messages[0].content.as_deref(),
            Some("Capital of France?")
        );
    }

    #[tokio::test]
    async fn test_missing_content_falls_back() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok(ChatResponse {
                id: "empty".to_string(),
                choices: Vec::new(),
                usage: None,
            }),
            text_response(""),
        ]));
        let relay = ChatRelay::new(model, "gpt-4o-mini");

        assert_eq!(relay.handle(Some("hi")).await, EMPTY_COMPLETION_REPLY);
        assert_eq!(relay.handle(Some("hi")).await, EMPTY_COMPLETION_REPLY);
    }

    #[tokio::test]
    async fn test_api_error_becomes_text() {
        let model = Arc::new(ScriptedModel::new(vec![Err(AppError::ModelInvocation(
            "API returned 401 Unauthorized: invalid api key".to_string(),
        ))]));
        let relay = ChatRelay::new(model, "gpt-4o-mini");
        assert_eq!(
            relay.handle(Some("hi")).await,
            "An error occurred while processing your request: API returned 401 Unauthorized: invalid api key"
        );
    }
}
