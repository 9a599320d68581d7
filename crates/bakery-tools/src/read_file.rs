use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::{max_length_arg, truncate_chars, Tool, ToolError};

/// Read file tool - returns the text of a file under a fixed root directory.
///
/// The agent uses it to read `bakery_hours.json`. Paths are relative to the
/// root; absolute paths, `..` components and symlinks leading outside the
/// root are refused.
pub struct ReadFileTool {
    root: PathBuf,
}

impl ReadFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `relative` inside the root.
    async fn resolve(&self, relative: &str) -> Result<PathBuf, ToolError> {
        let rel = Path::new(relative);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.trim().is_empty() || escapes {
            return Err(ToolError::InvalidArguments(format!(
                "Path must be relative to the data directory: {}",
                relative
            )));
        }

        let root = tokio::fs::canonicalize(&self.root).await?;
        let full = tokio::fs::canonicalize(root.join(rel)).await?;
        if !full.starts_with(&root) {
            return Err(ToolError::InvalidArguments(format!(
                "Path leaves the data directory: {}",
                relative
            )));
        }
        Ok(full)
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a text file from the bakery data directory, e.g. bakery_hours.json with the opening hours."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the data directory"
                },
                "max_length": {
                    "type": "integer",
                    "description": "Maximum characters to return (default: 8000)",
                    "default": 8000
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<String, ToolError> {
        let relative = args
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'path' parameter".to_string()))?;

        let path = self.resolve(relative).await?;
        debug!("Reading {}", path.display());

        if !tokio::fs::metadata(&path).await?.is_file() {
            return Err(ToolError::ExecutionFailed(format!("Not a file: {}", relative)));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let (content, _) = truncate_chars(content, max_length_arg(&args));
        Ok(content)
    }
}
