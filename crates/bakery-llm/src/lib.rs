//! LLM client for the bakery agent.
//!
//! - [`ChatModel`]: the seam the agent loop talks to
//! - [`LlmClient`]: OpenAI-compatible implementation (OpenAI, or any
//!   endpoint exposing `/v1/chat/completions`)
//!
//! # Tool Calling
//!
//! ```rust,ignore
//! use bakery_llm::{ChatModel, ChatResponse, LlmClient};
//!
//! let client = LlmClient::new("o3-mini", None);
//! let messages = vec![LlmClient::user_message("Can I order a croissant on Monday?")?];
//! match client.chat_with_tools(system, &messages, &tools).await? {
//!     ChatResponse::Content(resp) => println!("{}", resp.content),
//!     ChatResponse::ToolCalls { calls, .. } => { /* run tools, append results */ }
//! }
//! ```

mod client;

pub use client::{ChatModel, ChatResponse, LlmClient, LlmMetrics, LlmResponse};
pub use async_openai::types::ChatCompletionRequestMessage;
pub use bakery_core::{ToolCall, ToolSchema};
