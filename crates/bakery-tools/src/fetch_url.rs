use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::{max_length_arg, truncate_chars, Tool, ToolError};

/// Fetch URL tool - retrieves a web page (the bakery menu) as readable text.
pub struct FetchUrlTool {
    client: reqwest::Client,
}

impl FetchUrlTool {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (compatible; BakeryAgent/1.0)")
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for FetchUrlTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct PageContent {
    url: String,
    title: Option<String>,
    description: Option<String>,
    content: String,
    content_type: String,
    truncated: bool,
}

/// Extract title from HTML using simple string matching
fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let start = lower.find("<title>")? + "<title>".len();
    let end = lower[start..].find("</title>")? + start;
    let title = html[start..end].trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Extract meta description from HTML
fn extract_description(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();

    let patterns = [
        r#"name="description""#,
        r#"name='description'"#,
        r#"property="og:description""#,
    ];

    for pattern in patterns {
        let Some(pos) = lower.find(pattern) else { continue };

        // The content attribute may sit before or after the name attribute
        let tag_start = lower[..pos].rfind('<').unwrap_or(0);
        let tag_end = lower[pos..].find('>').map(|e| pos + e).unwrap_or(lower.len());
        let tag = &html[tag_start..tag_end];

        let Some(content_start) = tag.to_ascii_lowercase().find("content=") else { continue };
        let after = &tag[content_start + "content=".len()..];
        let Some(quote) = after.chars().next().filter(|q| *q == '"' || *q == '\'') else { continue };
        let value = &after[1..];
        if let Some(end) = value.find(quote) {
            return Some(value[..end].to_string());
        }
    }
    None
}

#[async_trait]
impl Tool for FetchUrlTool {
    fn name(&self) -> &str {
        "fetch_url"
    }

    fn description(&self) -> &str {
        "Fetch a web page, such as the bakery's online menu, and return its title, description and main text."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to fetch content from"
                },
                "max_length": {
                    "type": "integer",
                    "description": "Maximum characters for content (default: 8000)",
                    "default": 8000
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<String, ToolError> {
        let url = args
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'url' parameter".to_string()))?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ToolError::InvalidArguments(format!("Unsupported URL scheme: {}", url)));
        }

        let max_length = max_length_arg(&args);
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ToolError::ExecutionFailed(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/plain")
            .to_string();

        let is_html = content_type.contains("text/html");
        let body = response.text().await?;

        let (title, description) = if is_html {
            (extract_title(&body), extract_description(&body))
        } else {
            (None, None)
        };

        let text = if is_html {
            html2text::from_read(body.as_bytes(), 80)
        } else {
            body
        };

        let (content, truncated) = truncate_chars(text, max_length);

        let page = PageContent {
            url: url.to_string(),
            title,
            description,
            content,
            content_type,
            truncated,
        };

        serde_json::to_string_pretty(&page).map_err(|e| {
            ToolError::ExecutionFailed(format!("Failed to serialize response: {}", e))
        })
    }
}
