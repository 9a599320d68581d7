//! MCP tool server for the bakery availability check.
//!
//! Exposes one tool, `check_bakery_item`, answered by the same
//! [`QueryService`] the HTTP server uses.

use bakery_agent::QueryService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tracing::info;

pub const SERVER_NAME: &str = "bakery-mcp-server";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckItemRequest {
    #[schemars(description = "Menu item to check, e.g. \"croissant\"")]
    pub item: String,

    /// Without a day only the menu is checked.
    #[schemars(description = "Day of the week to order for, e.g. \"Saturday\"")]
    pub day: Option<String>,
}

/// Bakery availability checker served over MCP.
#[derive(Clone)]
pub struct BakeryMcpService {
    service: QueryService,
    tool_router: ToolRouter<Self>,
}

impl BakeryMcpService {
    pub fn new(service: QueryService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for BakeryMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Bakery availability checker. Use 'check_bakery_item' with an item and optionally a day to learn whether it can be ordered.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[tool_router]
impl BakeryMcpService {
    #[tool(description = "Check whether a bakery item can be ordered, optionally on a given day of the week.")]
    pub async fn check_bakery_item(
        &self,
        Parameters(request): Parameters<CheckItemRequest>,
    ) -> Result<CallToolResult, McpError> {
        let item = request.item.trim();
        if item.is_empty() {
            return Ok(CallToolResult::error(vec![Content::text("Error: item must not be empty")]));
        }

        let response = self.service.check_item(item, request.day.as_deref()).await;
        info!("check_bakery_item({}) answered from {:?}", item, response.source);

        Ok(CallToolResult::success(vec![Content::text(response.text)]))
    }
}
