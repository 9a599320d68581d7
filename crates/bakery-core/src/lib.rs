//! Core domain types and error definitions for the bakery service.
//!
//! This crate provides the types shared across the workspace:
//!
//! - [`Weekday`], [`DayHours`] and [`HoursTable`]: opening hours per day
//! - [`MenuCatalog`]: the items the bakery carries
//! - [`Response`] and [`Source`]: an answer and where it came from
//! - [`AgentError`]: errors from the LLM delegation path
//! - [`ModelConfig`], [`ToolCall`], [`ToolSchema`]: agent plumbing types
//!
//! # Example
//!
//! ```rust
//! use bakery_core::{HoursTable, MenuCatalog, Weekday};
//!
//! let hours = HoursTable::default();
//! assert!(hours.get(Weekday::Monday).unwrap().is_open);
//! assert!(!hours.get(Weekday::Sunday).unwrap().is_open);
//!
//! let menu = MenuCatalog::default();
//! assert!(menu.contains("Croissant"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while delegating a query to the LLM agent.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM API request failed.
    #[error("LLM request failed: {0}")]
    LlmError(String),

    /// Failed to parse output from the LLM.
    #[error("Failed to parse structured output: {0}")]
    ParseError(String),

    /// A tool invoked by the agent failed.
    #[error("Tool execution failed: {0}")]
    ToolFailed(String),

    /// The agent did not answer within the allotted time.
    #[error("Agent timed out after {0} ms")]
    Timeout(u64),

    /// The agent answered with nothing usable.
    #[error("Agent returned an empty answer")]
    EmptyAnswer,
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::ParseError(err.to_string())
    }
}

// ============================================================================
// Hours
// ============================================================================

/// The seven canonical days, in calendar order starting Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in canonical order. Day extraction scans in this order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Capitalized day name, e.g. `"Monday"`.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Returns `true` for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opening status for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub is_open: bool,
    /// Human-readable hours, e.g. `"7 AM to 7 PM"`.
    pub hours_text: String,
}

impl DayHours {
    pub fn open(hours_text: impl Into<String>) -> Self {
        Self { is_open: true, hours_text: hours_text.into() }
    }

    pub fn closed() -> Self {
        Self { is_open: false, hours_text: "Closed".to_string() }
    }
}

/// Per-day opening hours.
///
/// The default table covers all seven days. A table loaded from disk may be
/// partial; a missing day is unknown, not closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursTable {
    days: BTreeMap<Weekday, DayHours>,
}

impl Default for HoursTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for day in &Weekday::ALL[..5] {
            table.insert(*day, DayHours::open("7 AM to 7 PM"));
        }
        table.insert(Weekday::Saturday, DayHours::open("8 AM to 4 PM"));
        table.insert(Weekday::Sunday, DayHours::closed());
        table
    }
}

impl HoursTable {
    /// Creates a table with no days.
    pub fn empty() -> Self {
        Self { days: BTreeMap::new() }
    }

    /// Sets the hours for a day, replacing any previous entry.
    pub fn insert(&mut self, day: Weekday, hours: DayHours) {
        self.days.insert(day, hours);
    }

    /// Hours for a day, or `None` when the day is unknown.
    pub fn get(&self, day: Weekday) -> Option<&DayHours> {
        self.days.get(&day)
    }

    /// Known days in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        self.days.iter().map(|(d, h)| (*d, h))
    }

    /// Days known to be open, in calendar order.
    pub fn open_days(&self) -> Vec<Weekday> {
        self.iter().filter(|(_, h)| h.is_open).map(|(d, _)| d).collect()
    }

    /// Returns `true` when every weekday has an entry.
    pub fn is_complete(&self) -> bool {
        self.days.len() == Weekday::ALL.len()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

// ============================================================================
// Menu
// ============================================================================

const DEFAULT_MENU: [&str; 6] = ["bread", "cake", "croissant", "donut", "muffin", "pie"];

/// Ordered set of item names the bakery carries.
///
/// Membership is case-insensitive. Iteration order is the order items were
/// supplied in, and item extraction breaks ties by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCatalog {
    items: Vec<String>,
    /// Lowercased `items`, index for index.
    #[serde(skip)]
    keys: Vec<String>,
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MENU)
    }
}

impl MenuCatalog {
    /// Builds a catalog, trimming names and dropping blanks and
    /// case-insensitive duplicates. First occurrence wins.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self { items: Vec::new(), keys: Vec::new() };
        for item in items {
            let name = item.as_ref().trim();
            let key = name.to_lowercase();
            if name.is_empty() || catalog.keys.contains(&key) {
                continue;
            }
            catalog.items.push(name.to_string());
            catalog.keys.push(key);
        }
        catalog
    }

    /// Returns `true` if the catalog carries `name` (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// The catalog's own spelling of `name`, if carried.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        let key = name.trim().to_lowercase();
        self.keys
            .iter()
            .position(|k| *k == key)
            .map(|i| self.items[i].as_str())
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Lowercased names, in the same order as [`items`](Self::items).
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The LLM agent answered using its tools.
    Mcp,
    /// Deterministic answer standing in for a missing or failed agent answer.
    Fallback,
    /// Deterministic answer produced without consulting the agent.
    Direct,
    /// The request could not be answered.
    Error,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Mcp => "mcp",
            Source::Fallback => "fallback",
            Source::Direct => "direct",
            Source::Error => "error",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text answer tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    pub source: Source,
}

impl Response {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Self { text: text.into(), source }
    }

    pub fn direct(text: impl Into<String>) -> Self {
        Self::new(text, Source::Direct)
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self::new(text, Source::Fallback)
    }

    /// Same text, different provenance.
    pub fn with_source(self, source: Source) -> Self {
        Self { source, ..self }
    }
}

// ============================================================================
// Agent Types
// ============================================================================

/// Configuration for the LLM model backing the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Human-readable display name.
    pub name: String,
    /// The provider's model identifier (e.g., "o3-mini").
    pub model: String,
    /// Optional API base URL for OpenAI-compatible endpoints.
    pub api_base: Option<String>,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier used to match the result to the call.
    pub id: String,
    pub name: String,
    /// Arguments as a JSON object.
    pub arguments: serde_json::Value,
}

/// JSON schema describing a tool for LLM function calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema object for the tool's parameters.
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hours_cover_the_week() {
        let hours = HoursTable::default();
        assert!(hours.is_complete());
        assert_eq!(hours.open_days().len(), 6);
        assert_eq!(hours.get(Weekday::Saturday).unwrap().hours_text, "8 AM to 4 PM");
        assert!(!hours.get(Weekday::Sunday).unwrap().is_open);
    }

    #[test]
    fn partial_table_leaves_days_unknown() {
        let mut hours = HoursTable::empty();
        hours.insert(Weekday::Friday, DayHours::closed());
        assert!(hours.get(Weekday::Monday).is_none());
        assert!(!hours.is_complete());
        assert!(hours.open_days().is_empty());
    }

    #[test]
    fn weekday_parses_case_insensitively() {
        assert_eq!("monday".parse::<Weekday>(), Ok(Weekday::Monday));
        assert_eq!(" SUNDAY ".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert!("someday".parse::<Weekday>().is_err());
    }

    #[test]
    fn menu_dedups_and_keeps_order() {
        let menu = MenuCatalog::new(["Scone", "  ", "bagel", "scone", "Tart"]);
        assert_eq!(menu.items(), &["Scone", "bagel", "Tart"]);
        assert_eq!(menu.canonical("SCONE"), Some("Scone"));
        assert!(!menu.contains("bread"));
    }

    #[test]
    fn menu_folds_non_ascii_case() {
        let menu = MenuCatalog::new(["Crème brûlée", "CRÈME BRÛLÉE", "Äpfelkuchen"]);
        assert_eq!(menu.items(), &["Crème brûlée", "Äpfelkuchen"]);
        assert_eq!(menu.canonical("CRÈME BRÛLÉE"), Some("Crème brûlée"));
        assert!(menu.contains("äpfelkuchen"));
        assert_eq!(menu.keys(), &["crème brûlée", "äpfelkuchen"]);
    }

    #[test]
    fn source_serializes_lowercase() {
        let json = serde_json::to_string(&Source::Mcp).unwrap();
        assert_eq!(json, "\"mcp\"");
        assert_eq!(Source::Fallback.to_string(), "fallback");
    }
}
