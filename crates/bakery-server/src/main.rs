//! HTTP server entry point.
//!
//! Loads configuration and bakery data, optionally builds the LLM agent,
//! and serves the router from [`bakery_server::build_router`].

use std::sync::Arc;

use anyhow::Result;
use bakery_agent::build_service;
use bakery_config::ServiceConfig;
use bakery_server::{build_router, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;
    let (service, tools) = build_service(&config);
    let app = build_router(Arc::new(ServerState::new(service, tools)));

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
