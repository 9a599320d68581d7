//! Keyword extraction: menu items, day names and topic categories.

use bakery_core::{MenuCatalog, Weekday};
use serde::Serialize;

/// Topic of a query, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bread,
    Cake,
    Pastry,
    Coffee,
    Hours,
    Menu,
    Order,
    General,
}

/// Categories with their trigger keywords. Checked top to bottom; the first
/// category with any keyword in the query wins.
const CATEGORY_KEYWORDS: [(Category, &[&str]); 7] = [
    (Category::Bread, &["bread"]),
    (Category::Cake, &["cake"]),
    (Category::Pastry, &["pastry", "pastries"]),
    (Category::Coffee, &["coffee"]),
    (Category::Hours, &["hours", "open", "close", "closing"]),
    (Category::Menu, &["menu", "offer", "have"]),
    (Category::Order, &["order", "delivery", "pickup"]),
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Bread => "bread",
            Category::Cake => "cake",
            Category::Pastry => "pastry",
            Category::Coffee => "coffee",
            Category::Hours => "hours",
            Category::Menu => "menu",
            Category::Order => "order",
            Category::General => "general",
        }
    }
}

/// First catalog item whose name appears in the query, ignoring case.
///
/// Ties go to catalog order, not position in the query.
pub fn extract_item<'m>(query: &str, menu: &'m MenuCatalog) -> Option<&'m str> {
    let query = query.to_lowercase();
    menu.keys()
        .iter()
        .position(|key| query.contains(key.as_str()))
        .map(|i| menu.items()[i].as_str())
}

/// First day name (Monday through Sunday) appearing in the query, ignoring case.
pub fn extract_day(query: &str) -> Option<Weekday> {
    let query = query.to_lowercase();
    Weekday::ALL
        .into_iter()
        .find(|day| query.contains(&day.name().to_lowercase()))
}

/// Topic category of the query by fixed keyword priority.
pub fn classify(query: &str) -> Category {
    let query = query.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&query, keywords))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// `true` if the lowercased text contains any of the keywords.
pub(crate) fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lowered.contains(k))
}
