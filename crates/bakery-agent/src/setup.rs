//! Service wiring shared by the binaries.

use std::sync::Arc;

use bakery_config::{load_hours_or_default, load_menu_or_default, ServiceConfig};
use bakery_core::ToolSchema;
use tracing::{info, warn};

use crate::{BakeryAgent, QueryService};

/// Loads hours and menu, and wires the agent in when enabled.
///
/// Returns the service together with the agent's tool schemas, which are
/// empty when delegation is disabled.
pub fn build_service(config: &ServiceConfig) -> (QueryService, Vec<ToolSchema>) {
    let hours = load_hours_or_default(&config.hours_file);

    let menu = load_menu_or_default(config.menu_file.as_deref());
    info!("Menu has {} items", menu.len());
    for item in menu.items() {
        info!("  - {}", item);
    }

    let service = QueryService::new(hours, menu);

    if !config.agent.enabled {
        warn!("Agent delegation disabled, answering from local data only");
        return (service, Vec::new());
    }

    let agent = BakeryAgent::from_settings(&config.agent);
    let tools = agent.tool_schemas();
    info!("Registered {} tools", tools.len());
    info!("Agent timeout: {:?}", config.agent.timeout);

    (service.with_delegate(Arc::new(agent), config.agent.timeout), tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_core::Source;

    fn config(pairs: &'static [(&'static str, &'static str)]) -> ServiceConfig {
        ServiceConfig::from_lookup(|key| {
            pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[tokio::test]
    async fn disabled_agent_means_no_tools() {
        let (service, tools) = build_service(&config(&[("BAKERY_HOURS_FILE", "/nonexistent/hours.json")]));
        assert!(tools.is_empty());

        let r = service.answer("Can I order a croissant on Sunday?").await;
        assert_eq!(r.source, Source::Direct);
        assert!(r.text.contains("closed on Sunday"), "{}", r.text);
    }

    #[test]
    fn enabled_agent_registers_file_and_url_tools() {
        let (_, tools) = build_service(&config(&[
            ("AGENT_ENABLED", "true"),
            ("AGENT_API_BASE", "http://127.0.0.1:9/v1"),
            ("BAKERY_HOURS_FILE", "/nonexistent/hours.json"),
        ]));
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["fetch_url", "read_file"]);
    }
}
