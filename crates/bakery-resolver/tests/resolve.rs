//! End-to-end behavior of `resolve` against the default hours and menu.

use bakery_core::{DayHours, HoursTable, MenuCatalog, Source, Weekday};
use bakery_resolver::resolve;

fn defaults() -> (HoursTable, MenuCatalog) {
    (HoursTable::default(), MenuCatalog::default())
}

#[test]
fn croissant_on_monday_is_available() {
    let (hours, menu) = defaults();
    let r = resolve("Can I order a croissant on Monday?", &hours, &menu);
    assert_eq!(r.source, Source::Direct);
    assert!(r.text.contains("Monday"));
    assert!(r.text.contains("croissant"));
    assert!(r.text.contains("7 AM to 7 PM"));
}

#[test]
fn cake_on_sunday_is_closed() {
    let (hours, menu) = defaults();
    let r = resolve("Can I order a cake on Sunday?", &hours, &menu);
    assert!(r.text.contains("closed on Sunday"));
    for day in ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"] {
        assert!(r.text.contains(day), "missing {} in {}", day, r.text);
    }
}

#[test]
fn gluten_free_bread_lists_bake_days() {
    let (hours, menu) = defaults();
    let r = resolve("Do you have gluten free bread?", &hours, &menu);
    assert!(r.text.contains("gluten-free"));
    assert!(r.text.contains("Monday, Wednesday and Friday"));
    assert!(!r.text.contains("closed"));
}

#[test]
fn weekend_hours() {
    let (hours, menu) = defaults();
    let r = resolve("What are your hours on the weekend?", &hours, &menu);
    assert!(r.text.contains("8 AM to 4 PM"));
}

#[test]
fn unknown_items_are_not_carried() {
    let (hours, menu) = defaults();
    for query in [
        "Can I order a baguette on Monday?",
        "Do you sell sandwiches?",
        "",
        "   ",
        "¿Tienen empanadas el martes?",
    ] {
        let r = resolve(query, &hours, &menu);
        assert_ne!(r.source, Source::Error, "query {:?}", query);
        assert!(r.text.contains("don't carry"), "query {:?} got {}", query, r.text);
    }
}

#[test]
fn open_day_text_includes_hours_text() {
    let mut hours = HoursTable::empty();
    hours.insert(Weekday::Wednesday, DayHours::open("noon to 3 PM"));
    let menu = MenuCatalog::default();

    let r = resolve("pie on wednesday", &hours, &menu);
    assert!(r.text.contains("noon to 3 PM"));
}

#[test]
fn closed_day_names_an_open_day() {
    let mut hours = HoursTable::empty();
    hours.insert(Weekday::Monday, DayHours::closed());
    hours.insert(Weekday::Thursday, DayHours::open("9 AM to 1 PM"));
    let menu = MenuCatalog::default();

    let r = resolve("donut on Monday", &hours, &menu);
    assert!(r.text.contains("closed on Monday"));
    assert!(r.text.contains("Thursday"));
}

#[test]
fn resolve_is_idempotent() {
    let (hours, menu) = defaults();
    for query in ["Can I order a cake on Sunday?", "hours?", "delivery please"] {
        assert_eq!(resolve(query, &hours, &menu), resolve(query, &hours, &menu));
    }
}

#[test]
fn bread_outranks_cake() {
    let (hours, menu) = defaults();
    let r = resolve("Do you have bread or cake?", &hours, &menu);
    assert!(r.text.contains("fresh bread daily"));
}

#[test]
fn custom_menu_drives_matching() {
    let hours = HoursTable::default();
    let menu = MenuCatalog::new(["Scone", "Bagel"]);

    let r = resolve("Any bagels on Saturday?", &hours, &menu);
    assert!(r.text.contains("Bagel"));
    assert!(r.text.contains("8 AM to 4 PM"));

    let r = resolve("croissant on Saturday?", &hours, &menu);
    assert_eq!(r.source, Source::Fallback);
    assert!(r.text.contains("Scone and Bagel"));
}

#[test]
fn topic_sub_keywords_pick_their_text() {
    let (hours, menu) = defaults();
    let cases = [
        ("Is your chocolate cake any good?", "chocolate cake is available every day"),
        ("Can I get a cake for the weekend?", "please order cakes by Thursday"),
        ("Do you have sourdough bread?", "sourdough is baked fresh every morning"),
        ("Any vegan pastries today?", "vegan pastries"),
        ("Do you serve decaf coffee?", "we serve decaf"),
    ];
    for (query, expected) in cases {
        let r = resolve(query, &hours, &menu);
        assert_eq!(r.source, Source::Direct, "query {:?}", query);
        assert!(r.text.contains(expected), "query {:?} got {}", query, r.text);
    }

    let r = resolve("Can I get a cake for the weekend?", &hours, &menu);
    assert!(r.text.contains("Saturday 8 AM to 4 PM, Sunday closed"));
}

#[test]
fn hours_for_a_single_day() {
    let (hours, menu) = defaults();
    let r = resolve("What are your hours on Sunday?", &hours, &menu);
    assert_eq!(r.text, "We're closed on Sunday.");

    let r = resolve("What are your hours on Tuesday?", &hours, &menu);
    assert_eq!(r.text, "On Tuesday we're open 7 AM to 7 PM.");
}

#[test]
fn item_and_day_beat_topic_text() {
    let (hours, menu) = defaults();
    let r = resolve("Can I order a chocolate cake on Saturday?", &hours, &menu);
    assert_eq!(r.text, "Yes, you can order cake on Saturday. We're open 8 AM to 4 PM that day.");
    assert!(!r.text.contains("chocolate"));
}

#[test]
fn non_ascii_menu_items_match_in_any_case() {
    let hours = HoursTable::default();
    let menu = MenuCatalog::new(["Crème brûlée"]);
    let r = resolve("CRÈME BRÛLÉE on Monday", &hours, &menu);
    assert_eq!(r.source, Source::Direct);
    assert!(r.text.starts_with("Yes, you can order Crème brûlée on Monday."), "{}", r.text);
}
