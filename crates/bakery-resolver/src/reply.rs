//! Response texts: availability verdicts and per-topic answers.

use bakery_core::{HoursTable, MenuCatalog, Response, Weekday};

use crate::extract::Category;

/// Days gluten-free loaves are baked.
const GLUTEN_FREE_DAYS: [Weekday; 3] = [Weekday::Monday, Weekday::Wednesday, Weekday::Friday];

/// Availability verdict for an item on a day.
///
/// Unknown items get a "not carried" answer tagged `fallback`; every other
/// branch is tagged `direct`.
pub fn check_availability(
    item: Option<&str>,
    day: Option<Weekday>,
    hours: &HoursTable,
    menu: &MenuCatalog,
) -> Response {
    let Some(item) = item.and_then(|i| menu.canonical(i)) else {
        return not_carried(item, menu);
    };

    let Some(day) = day else {
        return Response::direct(format!(
            "Yes, {} is on our menu. Please specify which day you'd like to order it.",
            item
        ));
    };

    match hours.get(day) {
        Some(h) if h.is_open => Response::direct(format!(
            "Yes, you can order {} on {}. We're open {} that day.",
            item, day, h.hours_text
        )),
        Some(_) => {
            let open_days = hours.open_days();
            if open_days.is_empty() {
                return Response::direct(format!(
                    "Sorry, we're closed on {}, and we have no open days listed right now.",
                    day
                ));
            }
            let names: Vec<&str> = open_days.iter().map(Weekday::name).collect();
            Response::direct(format!(
                "Sorry, we're closed on {}. You can order {} on {}.",
                day,
                item,
                join_list(&names, "or")
            ))
        }
        None => Response::direct(format!(
            "I'm not sure about our hours on {}, but {} is on our menu.",
            day, item
        )),
    }
}

/// The "we don't carry that" answer.
pub fn not_carried(item: Option<&str>, menu: &MenuCatalog) -> Response {
    let selection = menu_listing(menu);
    let text = match item.map(str::trim).filter(|i| !i.is_empty()) {
        Some(item) => format!("Sorry, we don't carry '{}'. Our selection includes: {}.", item, selection),
        None => format!("Sorry, we don't carry that item. Our selection includes: {}.", selection),
    };
    Response::fallback(text)
}

/// Answer for a bare item lookup that matched nothing on the menu.
pub fn not_available(item: &str, menu: &MenuCatalog) -> Response {
    Response::fallback(format!(
        "Sorry, we don't have '{}' available. Our selection includes: {}",
        item.trim(),
        menu_listing(menu)
    ))
}

/// Topic answer for informational categories, or `None` when the category
/// has nothing to say without an item.
pub fn topic_reply(
    category: Category,
    lowered: &str,
    day: Option<Weekday>,
    hours: &HoursTable,
    menu: &MenuCatalog,
) -> Option<String> {
    let text = match category {
        Category::Bread => bread_reply(lowered),
        Category::Cake => cake_reply(lowered, hours),
        Category::Pastry => pastry_reply(lowered),
        Category::Coffee => coffee_reply(lowered),
        Category::Hours => hours_reply(lowered, day, hours),
        Category::Menu => format!("Our menu includes: {}.", menu_listing(menu)),
        Category::Order => order_reply(lowered)?,
        Category::General => return None,
    };
    Some(text)
}

/// Extra sentence appended to an availability answer for an open day.
pub fn day_note(category: Category, lowered: &str, day: Weekday) -> Option<&'static str> {
    match category {
        Category::Cake if day == Weekday::Friday => {
            Some("Cakes for Friday should be ordered by Wednesday so we can bake them fresh.")
        }
        Category::Bread if lowered.contains("gluten") && !GLUTEN_FREE_DAYS.contains(&day) => {
            Some("Note that gluten-free bread is only baked on Monday, Wednesday and Friday.")
        }
        _ => None,
    }
}

fn bread_reply(lowered: &str) -> String {
    if lowered.contains("gluten") {
        let days: Vec<&str> = GLUTEN_FREE_DAYS.iter().map(Weekday::name).collect();
        return format!(
            "Yes! Our gluten-free bread is baked on {}. Regular loaves are available every day we're open.",
            join_list(&days, "and")
        );
    }
    if lowered.contains("sourdough") {
        return "Our sourdough is baked fresh every morning and is usually ready by opening time.".into();
    }
    "We bake fresh bread daily, including sourdough, whole wheat, rye and baguettes.".into()
}

fn cake_reply(lowered: &str, hours: &HoursTable) -> String {
    if lowered.contains("chocolate") {
        return "Our chocolate cake is available every day we're open, whole or by the slice.".into();
    }
    if lowered.contains("friday") {
        return "Cakes for Friday should be ordered by Wednesday so we can bake them fresh.".into();
    }
    if lowered.contains("weekend") {
        return format!(
            "For weekend pickup, please order cakes by Thursday. {}",
            schedule(hours, |d| d.is_weekend(), "Weekend hours")
        );
    }
    "We offer layer cakes, cheesecakes and cupcakes. Custom cakes need 48 hours notice.".into()
}

fn pastry_reply(lowered: &str) -> String {
    if lowered.contains("vegan") {
        return "We have a rotating selection of vegan pastries; ask at the counter for today's options.".into();
    }
    "Our pastries include croissants, danishes, muffins and scones, baked fresh every morning.".into()
}

fn coffee_reply(lowered: &str) -> String {
    if lowered.contains("decaf") {
        return "Yes, we serve decaf as well as our regular espresso drinks and drip coffee.".into();
    }
    "We serve espresso drinks, drip coffee and tea all day while we're open.".into()
}

fn hours_reply(lowered: &str, day: Option<Weekday>, hours: &HoursTable) -> String {
    if lowered.contains("weekend") {
        return schedule(hours, |d| d.is_weekend(), "Weekend hours");
    }
    match day {
        Some(day) => match hours.get(day) {
            Some(h) if h.is_open => format!("On {} we're open {}.", day, h.hours_text),
            Some(_) => format!("We're closed on {}.", day),
            None => format!("I don't have hours listed for {}.", day),
        },
        None => schedule(hours, |_| true, "Our hours"),
    }
}

fn order_reply(lowered: &str) -> Option<String> {
    if lowered.contains("delivery") {
        return Some("We offer local delivery on orders placed at least one day ahead.".into());
    }
    if lowered.contains("pickup") {
        return Some("Orders can be picked up at the counter any time during opening hours.".into());
    }
    None
}

/// "`title`: Monday 7 AM to 7 PM, ..., Sunday closed." for the selected days.
fn schedule(hours: &HoursTable, include: impl Fn(&Weekday) -> bool, title: &str) -> String {
    let parts: Vec<String> = Weekday::ALL
        .iter()
        .filter(|d| include(*d))
        .map(|d| match hours.get(*d) {
            Some(h) if h.is_open => format!("{} {}", d, h.hours_text),
            Some(_) => format!("{} closed", d),
            None => format!("{} not listed", d),
        })
        .collect();
    format!("{}: {}.", title, parts.join(", "))
}

fn menu_listing(menu: &MenuCatalog) -> String {
    let items: Vec<&str> = menu.items().iter().map(String::as_str).collect();
    join_list(&items, "and")
}

/// Joins "a, b and c" with the given conjunction.
fn join_list(items: &[&str], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), conjunction, last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_core::{DayHours, Source};

    #[test]
    fn unknown_item_is_not_carried() {
        let r = check_availability(Some("baguette"), Some(Weekday::Monday), &HoursTable::default(), &MenuCatalog::default());
        assert_eq!(r.source, Source::Fallback);
        assert!(r.text.contains("don't carry 'baguette'"));
        assert!(r.text.contains("bread, cake, croissant, donut, muffin and pie"));
    }

    #[test]
    fn bare_lookup_miss_lists_selection() {
        let r = not_available(" scone ", &MenuCatalog::new(["bread", "pie"]));
        assert_eq!(r.source, Source::Fallback);
        assert_eq!(r.text, "Sorry, we don't have 'scone' available. Our selection includes: bread and pie");
    }

    #[test]
    fn known_item_without_day_asks_for_one() {
        let r = check_availability(Some("Muffin"), None, &HoursTable::default(), &MenuCatalog::default());
        assert_eq!(r.source, Source::Direct);
        assert!(r.text.contains("muffin is on our menu"));
        assert!(r.text.contains("specify which day"));
    }

    #[test]
    fn open_day_includes_hours() {
        let r = check_availability(Some("pie"), Some(Weekday::Saturday), &HoursTable::default(), &MenuCatalog::default());
        assert!(r.text.contains("Saturday"));
        assert!(r.text.contains("8 AM to 4 PM"));
    }

    #[test]
    fn closed_day_lists_open_days() {
        let r = check_availability(Some("pie"), Some(Weekday::Sunday), &HoursTable::default(), &MenuCatalog::default());
        assert!(r.text.contains("closed on Sunday"));
        assert!(r.text.contains("Monday, Tuesday, Wednesday, Thursday, Friday or Saturday"));
    }

    #[test]
    fn closed_everywhere_says_so() {
        let mut hours = HoursTable::empty();
        hours.insert(Weekday::Sunday, DayHours::closed());
        let r = check_availability(Some("pie"), Some(Weekday::Sunday), &hours, &MenuCatalog::default());
        assert!(r.text.contains("no open days listed"));
    }

    #[test]
    fn day_missing_from_table_is_unknown() {
        let mut hours = HoursTable::empty();
        hours.insert(Weekday::Monday, DayHours::open("9 to 5"));
        let r = check_availability(Some("donut"), Some(Weekday::Tuesday), &hours, &MenuCatalog::default());
        assert_eq!(r.source, Source::Direct);
        assert!(r.text.contains("not sure about our hours on Tuesday"));
        assert!(!r.text.contains("closed"));
    }

    #[test]
    fn join_list_shapes() {
        assert_eq!(join_list(&[], "and"), "");
        assert_eq!(join_list(&["a"], "and"), "a");
        assert_eq!(join_list(&["a", "b"], "or"), "a or b");
        assert_eq!(join_list(&["a", "b", "c"], "and"), "a, b and c");
    }

    #[test]
    fn schedule_reports_missing_days() {
        let mut hours = HoursTable::empty();
        hours.insert(Weekday::Saturday, DayHours::open("9 AM to noon"));
        let text = hours_reply("weekend?", None, &hours);
        assert_eq!(text, "Weekend hours: Saturday 9 AM to noon, Sunday not listed.");
    }
}
