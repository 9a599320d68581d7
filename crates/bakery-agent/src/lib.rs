//! Delegation of bakery questions to an LLM agent, with the deterministic
//! resolver as fallback.
//!
//! - [`Delegate`]: anything that can answer a question asynchronously
//! - [`BakeryAgent`]: LLM agent with `read_file` and `fetch_url` tools
//! - [`QueryService`]: tries the delegate within a timeout, falls back to
//!   [`bakery_resolver::resolve`]
//! - [`build_service`]: the service as the binaries start it from config

mod agent;
mod service;
mod setup;

pub use agent::{system_prompt, BakeryAgent, MAX_TOOL_ITERATIONS};
pub use service::QueryService;
pub use setup::build_service;

use async_trait::async_trait;
use bakery_core::AgentError;

/// An answerer the service can hand a question to.
#[async_trait]
pub trait Delegate: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Answers a free-text question.
    async fn answer(&self, query: &str) -> Result<String, AgentError>;
}
