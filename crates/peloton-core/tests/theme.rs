// File: crates/peloton-core/tests/theme.rs
// Purpose: Theme presets, lookup by name and category colors.

use peloton_core::theme::{find, presets};
use peloton_core::{Category, Rgba, Theme};

#[test]
fn presets_have_distinct_names() {
    let names: Vec<&str> = presets().iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["dark", "light", "high-contrast-dark"]);
}

#[test]
fn lookup_is_case_insensitive_with_dark_fallback() {
    assert_eq!(find("LIGHT"), Theme::light());
    assert_eq!(find("High-Contrast-Dark").name, "high-contrast-dark");
    assert_eq!(find(""), Theme::dark());
    assert_eq!(Theme::default(), Theme::dark());
}

#[test]
fn categories_use_alert_and_neutral_colors() {
    for theme in presets() {
        assert_ne!(theme.category_color(Category::Alleged), theme.category_color(Category::Clean));
    }
    let dark = Theme::dark();
    assert_eq!(dark.category_color(Category::Alleged).to_hex(), "#e74c3c");
    assert_eq!(dark.category_color(Category::Clean).to_hex(), "#3498db");
    assert_eq!(Rgba::new(0, 0, 0, 204).to_string(), "#000000");
}
