use std::sync::Arc;

use async_trait::async_trait;
use bakery_config::AgentSettings;
use bakery_core::{AgentError, ToolSchema};
use bakery_llm::{ChatModel, ChatResponse, LlmClient};
use bakery_tools::ToolRegistry;
use tracing::{debug, info, warn};

use crate::Delegate;

/// Upper bound on model turns that request tools before giving up.
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Instruction for the bakery assistant.
pub fn system_prompt(menu_url: &str) -> String {
    format!(
        "You are a helpful bakery assistant that checks if items are available.

When a customer asks about ordering an item on a specific day:
1. Check if the bakery is open on that day by reading bakery_hours.json with the read_file tool.
2. Check if the requested item is on the menu by fetching {menu_url} with the fetch_url tool.

Only say YES if the bakery is open on the requested day and the requested item is on the menu.
Otherwise say NO and explain why (bakery closed or item not available).
Be concise in your responses."
    )
}

/// LLM agent that answers availability questions using its tools.
pub struct BakeryAgent {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    system_prompt: String,
}

impl BakeryAgent {
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolRegistry, menu_url: &str) -> Self {
        Self {
            model,
            tools,
            system_prompt: system_prompt(menu_url),
        }
    }

    /// Builds the agent from settings: OpenAI-compatible client plus the
    /// default tools rooted at `files_root`.
    pub fn from_settings(settings: &AgentSettings) -> Self {
        let model = settings.model_config();
        info!("Agent model: {} ({})", model.name, model.model);
        let client = LlmClient::new(&model.model, model.api_base.as_deref());
        Self::new(
            Arc::new(client),
            ToolRegistry::with_defaults(settings.files_root.clone()),
            &settings.menu_url,
        )
    }

    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.list()
    }

    /// Runs the agentic loop until the model answers with content.
    pub async fn run(&self, query: &str) -> Result<String, AgentError> {
        let schemas = self.tools.list();
        info!("║     → Starting agentic loop with {} tools", schemas.len());
        debug!("║     Input: {}...", query.chars().take(100).collect::<String>());

        let mut messages = vec![LlmClient::user_message(query)?];

        for iteration in 1..=MAX_TOOL_ITERATIONS {
            let response = self
                .model
                .chat_with_tools(&self.system_prompt, &messages, &schemas)
                .await?;

            let calls = match response {
                ChatResponse::Content(llm_response) => {
                    info!(
                        "║     ← Final response: {} chars (after {} iterations)",
                        llm_response.content.len(),
                        iteration
                    );
                    return Ok(llm_response.content);
                }
                ChatResponse::ToolCalls { calls, .. } => calls,
            };

            info!(
                "║     ← Tool calls: {:?}",
                calls.iter().map(|c| &c.name).collect::<Vec<_>>()
            );
            messages.push(LlmClient::assistant_tool_calls_message(&calls)?);

            for call in &calls {
                info!("║       → Executing tool: {}", call.name);
                let result = self
                    .tools
                    .call(call)
                    .await
                    .map_err(|e| AgentError::ToolFailed(format!("{}: {}", call.name, e)))?;
                info!("║       ← Tool result: {} chars", result.len());
                messages.push(LlmClient::tool_result_message(&call.id, &result)?);
            }
        }

        warn!("║     ⚠ Max tool iterations ({}) reached", MAX_TOOL_ITERATIONS);
        Err(AgentError::LlmError(format!(
            "Max tool iterations ({}) exceeded",
            MAX_TOOL_ITERATIONS
        )))
    }
}

#[async_trait]
impl Delegate for BakeryAgent {
    fn name(&self) -> &str {
        "bakery-agent"
    }

    async fn answer(&self, query: &str) -> Result<String, AgentError> {
        self.run(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_core::ToolCall;
    use bakery_llm::{ChatCompletionRequestMessage, LlmMetrics, LlmResponse};
    use bakery_tools::{Tool, ToolError};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records how many messages each turn saw.
    struct Scripted {
        replies: Mutex<VecDeque<ChatResponse>>,
        seen: Mutex<Vec<usize>>,
        repeat_tool_calls: bool,
    }

    impl Scripted {
        fn new(replies: Vec<ChatResponse>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
                repeat_tool_calls: false,
            }
        }

        fn looping() -> Self {
            Self { repeat_tool_calls: true, ..Self::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl ChatModel for Scripted {
        async fn chat_with_tools(
            &self,
            _system_prompt: &str,
            messages: &[ChatCompletionRequestMessage],
            _tools: &[ToolSchema],
        ) -> Result<ChatResponse, AgentError> {
            self.seen.lock().unwrap().push(messages.len());
            if self.repeat_tool_calls {
                return Ok(hours_call());
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AgentError::LlmError("script exhausted".into()))
        }
    }

    struct Hours;

    #[async_trait]
    impl Tool for Hours {
        fn name(&self) -> &str {
            "read_file"
        }
        fn description(&self) -> &str {
            "Returns canned hours"
        }
        fn parameters(&self) -> serde_json::Value {
            json!({ "type": "object", "properties": {} })
        }
        async fn execute(&self, _args: serde_json::Value) -> Result<String, ToolError> {
            Ok(r#"{"Monday": "7 AM to 7 PM"}"#.into())
        }
    }

    fn hours_call() -> ChatResponse {
        ChatResponse::ToolCalls {
            calls: vec![ToolCall {
                id: "call_1".into(),
                name: "read_file".into(),
                arguments: json!({ "path": "bakery_hours.json" }),
            }],
            metrics: LlmMetrics::default(),
        }
    }

    fn content(text: &str) -> ChatResponse {
        ChatResponse::Content(LlmResponse { content: text.into(), metrics: LlmMetrics::default() })
    }

    fn registry() -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        tools.register(Hours);
        tools
    }

    #[test]
    fn prompt_names_both_tools_and_menu_url() {
        let prompt = system_prompt("https://example.com/menu");
        assert!(prompt.contains("read_file"));
        assert!(prompt.contains("fetch_url"));
        assert!(prompt.contains("https://example.com/menu"));
    }

    #[tokio::test]
    async fn tool_round_trip_then_answer() {
        let model = Arc::new(Scripted::new(vec![hours_call(), content("YES, we're open Monday.")]));
        let agent = BakeryAgent::new(model.clone(), registry(), "https://example.com/menu");

        let answer = agent.answer("Can I order a croissant on Monday?").await.unwrap();
        assert_eq!(answer, "YES, we're open Monday.");
        // user; then user + assistant tool calls + tool result
        assert_eq!(*model.seen.lock().unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn unknown_tool_fails() {
        let model = Arc::new(Scripted::new(vec![hours_call()]));
        let agent = BakeryAgent::new(model, ToolRegistry::new(), "https://example.com/menu");

        let err = agent.answer("Can I order a pie?").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolFailed(_)));
    }

    #[tokio::test]
    async fn stops_after_max_iterations() {
        let model = Arc::new(Scripted::looping());
        let agent = BakeryAgent::new(model.clone(), registry(), "https://example.com/menu");

        let err = agent.answer("Can I order a pie?").await.unwrap_err();
        assert!(matches!(err, AgentError::LlmError(_)));
        assert_eq!(model.seen.lock().unwrap().len(), MAX_TOOL_ITERATIONS);
    }
}
