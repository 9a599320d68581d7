//! Service configuration and static data loading.
//!
//! - [`ServiceConfig`]: bind address, data file locations and agent settings,
//!   read from environment variables
//! - [`load_hours`] / [`load_hours_or_default`]: the hours table JSON file
//! - [`load_menu`] / [`load_menu_or_default`]: the optional menu JSON file
//!
//! # Hours file format
//!
//! ```json
//! {
//!   "Monday":   { "open": true, "hours": "7 AM to 7 PM" },
//!   "Saturday": "8 AM to 4 PM",
//!   "Sunday":   "Closed"
//! }
//! ```
//!
//! Day keys are case-insensitive. The object may also be nested under a
//! top-level `"hours"` key.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bakery_core::{DayHours, HoursTable, MenuCatalog, ModelConfig, Weekday};
use serde::Deserialize;
use tracing::{info, warn};

/// Errors that can occur when loading configuration or data files.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting or file held a value that cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Creates an IO error with path context.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue { key: key.into(), message: message.into() }
    }
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOURS_FILE: &str = "bakery_hours.json";
const DEFAULT_MENU_URL: &str = "https://www.flourbakery.com/menu";
const DEFAULT_AGENT_MODEL: &str = "o3-mini";
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 30;

/// Settings for the LLM delegation path.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub enabled: bool,
    pub model: String,
    pub api_base: Option<String>,
    pub timeout: Duration,
    /// Directory the agent's file tool may read from.
    pub files_root: PathBuf,
    /// Page the agent fetches to check the menu.
    pub menu_url: String,
}

impl AgentSettings {
    /// Model configuration for the LLM client.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            name: format!("Bakery agent ({})", self.model),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub hours_file: PathBuf,
    pub menu_file: Option<PathBuf>,
    pub agent: AgentSettings,
}

impl ServiceConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", format!("'{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let hours_file = PathBuf::from(get("BAKERY_HOURS_FILE").unwrap_or_else(|| DEFAULT_HOURS_FILE.into()));
        let menu_file = get("BAKERY_MENU_FILE").map(PathBuf::from);

        let enabled = match get("AGENT_ENABLED") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::invalid("AGENT_ENABLED", format!("'{}' is not a boolean", raw))
            })?,
            None => get("OPENAI_API_KEY").is_some(),
        };

        let timeout_secs = match get("AGENT_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ConfigError::invalid("AGENT_TIMEOUT_SECS", format!("'{}' is not a positive integer", raw))
                })?,
            None => DEFAULT_AGENT_TIMEOUT_SECS,
        };

        let files_root = get("AGENT_FILES_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| parent_dir(&hours_file));

        let agent = AgentSettings {
            enabled,
            model: get("AGENT_MODEL").unwrap_or_else(|| DEFAULT_AGENT_MODEL.into()),
            api_base: get("AGENT_API_BASE"),
            timeout: Duration::from_secs(timeout_secs),
            files_root,
            menu_url: get("BAKERY_MENU_URL").unwrap_or_else(|| DEFAULT_MENU_URL.into()),
        };

        Ok(Self { host, port, hours_file, menu_file, agent })
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// ============================================================================
// Hours
// ============================================================================

/// A day entry in the hours file: either a record or a bare hours string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DayEntry {
    Record {
        #[serde(alias = "is_open", alias = "isOpen")]
        open: bool,
        #[serde(default, alias = "hours_text", alias = "hoursText")]
        hours: Option<String>,
    },
    Text(String),
}

impl From<DayEntry> for DayHours {
    fn from(entry: DayEntry) -> Self {
        match entry {
            DayEntry::Record { open: false, .. } => DayHours::closed(),
            DayEntry::Record { open: true, hours } => {
                DayHours::open(hours.unwrap_or_else(|| "hours not listed".to_string()))
            }
            DayEntry::Text(text) if text.trim().eq_ignore_ascii_case("closed") => DayHours::closed(),
            DayEntry::Text(text) => DayHours::open(text.trim()),
        }
    }
}

/// Parses an hours table from JSON text.
///
/// Unrecognized keys are skipped. Keys naming the same day in different
/// case are taken in byte order and the first one wins. A document with no
/// recognized day is an error.
pub fn parse_hours(content: &str) -> Result<HoursTable, ConfigError> {
    let mut root: serde_json::Value = serde_json::from_str(content)?;
    if root.get("hours").is_some_and(|v| v.is_object()) {
        root = root["hours"].take();
    }

    let entries: BTreeMap<String, DayEntry> = serde_json::from_value(root)?;
    let mut table = HoursTable::empty();

    for (key, entry) in entries {
        match key.parse::<Weekday>() {
            Ok(day) if table.get(day).is_some() => {
                warn!("Ignoring duplicate entry '{}' for {} in hours file", key, day)
            }
            Ok(day) => table.insert(day, entry.into()),
            Err(()) => warn!("Ignoring unknown day '{}' in hours file", key),
        }
    }

    if table.is_empty() {
        return Err(ConfigError::invalid("hours", "no recognized days"));
    }
    Ok(table)
}

/// Loads the hours table from a JSON file.
pub fn load_hours(path: &Path) -> Result<HoursTable, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path.display().to_string(), e))?;
    parse_hours(&content)
}

/// Loads the hours table, substituting the built-in default on any error.
pub fn load_hours_or_default(path: &Path) -> HoursTable {
    match load_hours(path) {
        Ok(table) => {
            info!("Loaded hours for {} days from {}", table.len(), path.display());
            if !table.is_complete() {
                warn!("Hours file lists {} of 7 days; missing days are unknown", table.len());
            }
            table
        }
        Err(e) => {
            warn!("Using default bakery hours: {}", e);
            HoursTable::default()
        }
    }
}

// ============================================================================
// Menu
// ============================================================================

/// Loads a menu catalog from a JSON array of item names.
pub fn load_menu(path: &Path) -> Result<MenuCatalog, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path.display().to_string(), e))?;
    let items: Vec<String> = serde_json::from_str(&content)?;
    let menu = MenuCatalog::new(items);

    if menu.is_empty() {
        return Err(ConfigError::invalid("menu", "no items listed"));
    }
    Ok(menu)
}

/// Loads the menu from `path` if given, falling back to the default catalog.
pub fn load_menu_or_default(path: Option<&Path>) -> MenuCatalog {
    let Some(path) = path else {
        return MenuCatalog::default();
    };

    load_menu(path).unwrap_or_else(|e| {
        warn!("Using default menu: {}", e);
        MenuCatalog::default()
    })
}
