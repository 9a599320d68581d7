//! Tool registry and the bakery agent's built-in tools.
//!
//! - [`Tool`]: Trait for tools the LLM can call
//! - [`ToolRegistry`]: Registry of available tools
//! - [`ReadFileTool`]: Reads files under a sandbox root (the hours file)
//! - [`FetchUrlTool`]: Fetches a web page as text (the menu page)
//!
//! # Using the Registry
//!
//! ```rust,ignore
//! use bakery_tools::ToolRegistry;
//!
//! let registry = ToolRegistry::with_defaults("data/");
//! let schemas = registry.list();
//! ```

mod fetch_url;
mod read_file;

pub use fetch_url::FetchUrlTool;
pub use read_file::ReadFileTool;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub use bakery_core::{ToolCall, ToolSchema};

/// Default cap on characters returned by a tool.
pub const DEFAULT_MAX_LENGTH: usize = 8000;

/// Errors that can occur during tool execution.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool execution failed with a message.
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// Invalid arguments were passed to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Network request failed.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// File access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested tool was not found in the registry.
    #[error("Tool not found: {0}")]
    NotFound(String),
}

/// Trait for tools that can be called by the LLM.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a description of what this tool does.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for this tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Executes the tool with the given JSON arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<String, ToolError>;

    /// Generates the schema for this tool.
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Registry of tools available to the agent, keyed by name.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Creates an empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Creates a registry with `read_file` (rooted at `files_root`) and
    /// `fetch_url`.
    pub fn with_defaults(files_root: impl Into<PathBuf>) -> Self {
        let mut registry = Self::new();
        registry.register(ReadFileTool::new(files_root));
        registry.register(FetchUrlTool::new());
        registry
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    /// Gets a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Schemas for all registered tools, sorted by name.
    pub fn list(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Runs a tool call against the registry.
    pub async fn call(&self, call: &ToolCall) -> Result<String, ToolError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        tool.execute(call.arguments.clone()).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Reads an optional `max_length` argument.
pub(crate) fn max_length_arg(args: &serde_json::Value) -> usize {
    args.get("max_length")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MAX_LENGTH)
}

/// Truncates to at most `max_chars` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: String, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text, false),
    }
}
