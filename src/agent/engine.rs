use std::sync::Arc;

use crate::agent::openai::{ChatMessage, ChatModel, ChatRequest, Role, ToolCall};
use crate::agent::tools::{ToolOutcome, ToolRegistry};
use crate::error::{AppError, Result};

/// One executed tool call.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub tool_name: String,
    pub outcome: ToolOutcome,
}

/// Everything a bounded agent run produced.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    /// Text of the final model response.
    pub text: String,
    /// Tool results in execution order, across all steps.
    pub tool_results: Vec<ToolResult>,
    pub steps: u32,
}

impl Interaction {
    /// The authoritative tool outcome: the last one produced.
    pub fn last_outcome(&self) -> Option<&ToolOutcome> {
        self.tool_results.last().map(|r| &r.outcome)
    }
}

pub struct AgentEngine {
    model: Arc<dyn ChatModel>,
    model_name: String,
    tools: ToolRegistry,
    max_steps: u32,
}

impl AgentEngine {
    pub fn new(
        model: Arc<dyn ChatModel>,
        model_name: &str,
        tools: ToolRegistry,
        max_steps: u32,
    ) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
            tools,
            max_steps,
        }
    }

    /// Run the tool-use loop for at most `max_steps` model calls.
    ///
    /// Each step sends the conversation so far. A response without tool calls
    /// ends the run; otherwise every requested tool is executed in order and
    /// its result appended for the next step.
    pub async fn run(&self, system_prompt: &str, user_message: &str) -> Result<Interaction> {
        let tool_definitions = self.tools.definitions();

        let mut messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ];
        let mut interaction = Interaction::default();

        for step in 0..self.max_steps {
            tracing::info!(step = step, "Agent step");

            let request = ChatRequest {
                model: self.model_name.clone(),
                messages: messages.clone(),
                tools: tool_definitions.clone(),
            };

            let response = self.model.complete(&request).await?;
            interaction.steps = step + 1;

            if let Some(usage) = &response.usage {
                tracing::info!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "Model response"
                );
            }

            let message = response.first_message().cloned().ok_or_else(|| {
                AppError::ModelInvocation("Response contained no choices".to_string())
            })?;

            interaction.text = message.content.clone().unwrap_or_default();
            let tool_calls = message.tool_calls.clone().unwrap_or_default();

            if tool_calls.is_empty() {
                tracing::info!(steps = interaction.steps, "Agent finished without tool calls");
                return Ok(interaction);
            }

            messages.push(ChatMessage {
                role: Role::Assistant,
                content: message.content,
                tool_calls: Some(tool_calls.clone()),
                tool_call_id: None,
            });

            for call in &tool_calls {
                let outcome = self.execute_tool(call).await;
                let content = serde_json::to_string(&outcome)?;

                messages.push(ChatMessage::tool_result(&call.id, content));
                interaction.tool_results.push(ToolResult {
                    tool_name: call.function.name.clone(),
                    outcome,
                });
            }
        }

        tracing::info!(
            max_steps = self.max_steps,
            tool_calls = interaction.tool_results.len(),
            "Agent reached step limit"
        );
        Ok(interaction)
    }

    async fn execute_tool(&self, call: &ToolCall) -> ToolOutcome {
        let name = call.function.name.as_str();
        tracing::info!(tool = %name, "Executing tool");

        let Some(tool) = self.tools.get(name) else {
            tracing::warn!(tool = %name, "Model requested unknown tool");
            let error = format!("Unknown tool: {name}");
            return ToolOutcome::failed(error.clone(), error);
        };

        let input = match serde_json::from_str(&call.function.arguments) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "Unparseable tool arguments");
                serde_json::Value::Null
            }
        };

        let outcome = tool.execute(input).await;
        if outcome.success {
            tracing::debug!(tool = %name, "Tool succeeded");
        } else {
            tracing::warn!(tool = %name, message = %outcome.message, "Tool failed");
        }
        outcome
    }
}
