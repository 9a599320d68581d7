//! MCP server entry point.
//!
//! Add to an MCP client configuration:
//! ```json
//! { "mcpServers": { "bakery": { "command": "bakery-mcp" } } }
//! ```

use anyhow::Result;
use bakery_agent::build_service;
use bakery_config::ServiceConfig;
use bakery_mcp::{BakeryMcpService, SERVER_NAME};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout is the MCP channel
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;
    let (service, _tools) = build_service(&config);

    info!("Starting {}", SERVER_NAME);
    let server = BakeryMcpService::new(service).serve(stdio()).await?;
    server.waiting().await?;
    info!("{} stopped", SERVER_NAME);

    Ok(())
}
