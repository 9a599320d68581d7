//! OpenAI-compatible chat client with tool calling.

use std::time::Instant;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs,
        FunctionCall, FunctionObject,
    },
    Client,
};
use async_trait::async_trait;
use bakery_core::{AgentError, ToolCall, ToolSchema};
use tracing::{info, warn};

/// Token usage and timing metrics from an LLM call.
#[derive(Debug, Clone, Default)]
pub struct LlmMetrics {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub elapsed_ms: u64,
}

/// Complete response from an LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub metrics: LlmMetrics,
}

/// Response from an LLM that may include tool calls.
#[derive(Debug, Clone)]
pub enum ChatResponse {
    Content(LlmResponse),
    ToolCalls { calls: Vec<ToolCall>, metrics: LlmMetrics },
}

/// A model that can answer a conversation, optionally by requesting tools.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the conversation and returns content or tool calls.
    async fn chat_with_tools(
        &self,
        system_prompt: &str,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ToolSchema],
    ) -> Result<ChatResponse, AgentError>;
}

/// Converts any error into an AgentError::LlmError.
fn llm_err(e: impl ToString) -> AgentError {
    AgentError::LlmError(e.to_string())
}

fn system_message(system_prompt: &str) -> Result<ChatCompletionRequestMessage, AgentError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(llm_err)?,
    ))
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    default_model: String,
}

impl LlmClient {
    /// Creates a new client for the given model and optional API base URL.
    ///
    /// The API key comes from `OPENAI_API_KEY`.
    pub fn new(model: &str, api_base: Option<&str>) -> Self {
        let config = match api_base {
            Some(base) => OpenAIConfig::new()
                .with_api_base(base)
                .with_api_key(std::env::var("OPENAI_API_KEY").unwrap_or_else(|_| "local".into())),
            None => OpenAIConfig::default(),
        };

        Self {
            client: Client::with_config(config),
            default_model: model.to_string(),
        }
    }

    /// Helper to build a user message.
    pub fn user_message(content: &str) -> Result<ChatCompletionRequestMessage, AgentError> {
        Ok(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map_err(llm_err)?,
        ))
    }

    /// Helper to build the assistant turn that requested `calls`.
    ///
    /// OpenAI requires it to precede the matching tool results.
    pub fn assistant_tool_calls_message(calls: &[ToolCall]) -> Result<ChatCompletionRequestMessage, AgentError> {
        let tool_calls: Vec<ChatCompletionMessageToolCall> = calls
            .iter()
            .map(|c| ChatCompletionMessageToolCall {
                id: c.id.clone(),
                r#type: ChatCompletionToolType::Function,
                function: FunctionCall {
                    name: c.name.clone(),
                    arguments: c.arguments.to_string(),
                },
            })
            .collect();

        Ok(ChatCompletionRequestMessage::Assistant(
            ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls)
                .build()
                .map_err(llm_err)?,
        ))
    }

    /// Helper to build a tool result message.
    pub fn tool_result_message(tool_call_id: &str, content: &str) -> Result<ChatCompletionRequestMessage, AgentError> {
        Ok(ChatCompletionRequestMessage::Tool(
            ChatCompletionRequestToolMessageArgs::default()
                .tool_call_id(tool_call_id)
                .content(content)
                .build()
                .map_err(llm_err)?,
        ))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn chat_with_tools(
        &self,
        system_prompt: &str,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ToolSchema],
    ) -> Result<ChatResponse, AgentError> {
        let start = Instant::now();

        let openai_tools: Vec<ChatCompletionTool> = tools
            .iter()
            .map(|t| ChatCompletionTool {
                r#type: ChatCompletionToolType::Function,
                function: FunctionObject {
                    name: t.name.clone(),
                    description: Some(t.description.clone()),
                    parameters: Some(t.parameters.clone()),
                    strict: None,
                },
            })
            .collect();

        let mut all_messages = vec![system_message(system_prompt)?];
        all_messages.extend(messages.iter().cloned());

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.default_model).messages(all_messages);

        if !openai_tools.is_empty() {
            request_builder.tools(openai_tools);
        }

        let request = request_builder.build().map_err(llm_err)?;
        let response = self.client.chat().create(request).await.map_err(llm_err)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let (input_tokens, output_tokens) = response
            .usage
            .as_ref()
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        let metrics = LlmMetrics { input_tokens, output_tokens, elapsed_ms };
        info!("LLM: {}ms, tokens: {}/{} (in/out)", elapsed_ms, input_tokens, output_tokens);

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::LlmError("No response choices".into()))?;

        if let Some(tool_calls) = choice.message.tool_calls.filter(|c| !c.is_empty()) {
            let calls = tool_calls
                .into_iter()
                .map(|tc| {
                    let arguments = serde_json::from_str(&tc.function.arguments).unwrap_or_else(|e| {
                        warn!("Unparseable arguments for {}: {}", tc.function.name, e);
                        serde_json::Value::Null
                    });
                    ToolCall { id: tc.id, name: tc.function.name, arguments }
                })
                .collect();
            return Ok(ChatResponse::ToolCalls { calls, metrics });
        }

        let content = choice
            .message
            .content
            .ok_or_else(|| AgentError::LlmError("No response content".into()))?;

        Ok(ChatResponse::Content(LlmResponse { content, metrics }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_turn_carries_tool_calls() {
        let calls = vec![ToolCall {
            id: "call_1".into(),
            name: "read_file".into(),
            arguments: json!({ "path": "bakery_hours.json" }),
        }];
        let msg = LlmClient::assistant_tool_calls_message(&calls).unwrap();
        let ChatCompletionRequestMessage::Assistant(assistant) = msg else {
            panic!("expected assistant message");
        };
        let tool_calls = assistant.tool_calls.unwrap();
        assert_eq!(tool_calls[0].id, "call_1");
        assert_eq!(tool_calls[0].function.name, "read_file");
        assert_eq!(tool_calls[0].function.arguments, r#"{"path":"bakery_hours.json"}"#);
    }

    #[test]
    fn tool_result_keeps_call_id() {
        let msg = LlmClient::tool_result_message("call_9", "{}").unwrap();
        let ChatCompletionRequestMessage::Tool(tool) = msg else {
            panic!("expected tool message");
        };
        assert_eq!(tool.tool_call_id, "call_9");
    }
}
