//! Deterministic answers to bakery availability questions.
//!
//! [`resolve`] maps a free-text query, the hours table and the menu to a
//! [`Response`]. It is a pure function: no I/O, no shared state, and every
//! input produces a text answer. The service uses it directly when no agent
//! is configured and as the fallback when the agent fails.
//!
//! # Example
//!
//! ```rust
//! use bakery_core::{HoursTable, MenuCatalog, Source};
//! use bakery_resolver::resolve;
//!
//! let r = resolve("Can I order a croissant on Monday?", &HoursTable::default(), &MenuCatalog::default());
//! assert!(r.text.contains("Monday"));
//! assert_eq!(r.source, Source::Direct);
//! ```

mod extract;
mod reply;

pub use extract::{classify, extract_day, extract_item, Category};
pub use reply::{check_availability, not_available, not_carried};

use bakery_core::{HoursTable, MenuCatalog, Response, Weekday};
use tracing::debug;

use crate::reply::{day_note, topic_reply};

/// What the resolver found in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryAnalysis<'m> {
    pub item: Option<&'m str>,
    pub day: Option<Weekday>,
    pub category: Category,
}

/// Extracts item, day and category from a query.
pub fn analyze<'m>(query: &str, menu: &'m MenuCatalog) -> QueryAnalysis<'m> {
    QueryAnalysis {
        item: extract_item(query, menu),
        day: extract_day(query),
        category: classify(query),
    }
}

/// Answers a free-text query.
///
/// An item together with a day gets an availability verdict. Otherwise the
/// query's topic decides: informational topics get their topic text, and
/// the rest fall through to the availability check, which asks for a day
/// when an item is known and reports "not carried" when none is.
pub fn resolve(query: &str, hours: &HoursTable, menu: &MenuCatalog) -> Response {
    let lowered = query.to_lowercase();
    let analysis = analyze(query, menu);
    debug!(
        item = ?analysis.item,
        day = ?analysis.day,
        category = analysis.category.label(),
        "Resolving query"
    );

    if let (Some(item), Some(day)) = (analysis.item, analysis.day) {
        let mut response = check_availability(Some(item), Some(day), hours, menu);
        let open = hours.get(day).is_some_and(|h| h.is_open);
        if let Some(note) = day_note(analysis.category, &lowered, day).filter(|_| open) {
            response.text = format!("{} {}", response.text, note);
        }
        return response;
    }

    if let Some(text) = topic_reply(analysis.category, &lowered, analysis.day, hours, menu) {
        return Response::direct(text);
    }

    check_availability(analysis.item, analysis.day, hours, menu)
}

/// Quick menu lookup for a bare item name, e.g. `"croissants"`.
///
/// Returns `None` when the name matches no menu item, so the caller can
/// try the agent before settling on [`not_available`].
pub fn quick_check(item: &str, menu: &MenuCatalog) -> Option<Response> {
    extract_item(item, menu)
        .map(|found| Response::direct(format!("Yes, we have {} available in our bakery!", found)))
}
