//! Interactive terminal session against the bakery service.
//!
//! Each line read from stdin is answered like a `POST /check` query.
//! `exit`, `quit` or end of input ends the session.

use anyhow::Result;
use bakery_agent::build_service;
use bakery_config::ServiceConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;
    let (service, _tools) = build_service(&config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Ask about the bakery (\"exit\" to quit)\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        if !query.is_empty() {
            let response = service.answer(query).await;
            stdout
                .write_all(format!("[{}] {}\n", response.source, response.text).as_bytes())
                .await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
