// File: crates/peloton-core/src/theme.rs
// Summary: Dark/Light theming for chart colors, including the two mark categories.

use crate::record::Category;
use crate::scene::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub title: Rgba,
    pub axis_line: Rgba,
    pub tick_label: Rgba,
    pub legend_label: Rgba,
    pub message: Rgba,
    /// Marks with a doping allegation.
    pub alleged: Rgba,
    /// Marks without one.
    pub clean: Rgba,
    pub tooltip_background: Rgba,
    pub tooltip_text: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(0x28, 0x2c, 0x34),
            title: Rgba::rgb(0xff, 0xff, 0xff),
            axis_line: Rgba::rgb(180, 180, 190),
            tick_label: Rgba::rgb(235, 235, 245),
            legend_label: Rgba::rgb(0xff, 0xff, 0xff),
            message: Rgba::rgb(0xff, 0xff, 0xff),
            alleged: Rgba::rgb(0xe7, 0x4c, 0x3c),
            clean: Rgba::rgb(0x34, 0x98, 0xdb),
            tooltip_background: Rgba::new(0, 0, 0, 204),
            tooltip_text: Rgba::rgb(0xff, 0xff, 0xff),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            title: Rgba::rgb(20, 20, 30),
            axis_line: Rgba::rgb(60, 60, 70),
            tick_label: Rgba::rgb(20, 20, 30),
            legend_label: Rgba::rgb(20, 20, 30),
            message: Rgba::rgb(20, 20, 30),
            alleged: Rgba::rgb(0xe7, 0x4c, 0x3c),
            clean: Rgba::rgb(0x34, 0x98, 0xdb),
            tooltip_background: Rgba::new(255, 255, 255, 230),
            tooltip_text: Rgba::rgb(20, 20, 30),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Rgba::rgb(0x00, 0x00, 0x00),
            title: Rgba::rgb(0xff, 0xff, 0xff),
            axis_line: Rgba::rgb(0xff, 0xff, 0xff),
            tick_label: Rgba::rgb(0xff, 0xff, 0xff),
            legend_label: Rgba::rgb(0xff, 0xff, 0xff),
            message: Rgba::rgb(0xff, 0xff, 0xff),
            alleged: Rgba::rgb(0xff, 0x00, 0x00),
            clean: Rgba::rgb(0x00, 0xaa, 0xff),
            tooltip_background: Rgba::rgb(0x22, 0x22, 0x22),
            tooltip_text: Rgba::rgb(0xff, 0xff, 0x00),
        }
    }

    /// Fill for a mark or legend swatch.
    pub fn category_color(&self, category: Category) -> Rgba {
        match category {
            Category::Alleged => self.alleged,
            Category::Clean => self.clean,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    Theme::dark()
}
