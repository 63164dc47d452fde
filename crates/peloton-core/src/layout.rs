// File: crates/peloton-core/src/layout.rs
// Summary: Responsive layout (surface size and padding) derived from the viewport width.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default maximum surface width in pixels.
pub const MAX_WIDTH: f64 = 800.0;
/// Share of the viewport width the chart may occupy.
pub const WIDTH_FRACTION: f64 = 0.9;
/// Surface height as a fraction of its width.
pub const ASPECT_RATIO: f64 = 0.6;
/// Inset reserved around the plot area for axes and title.
pub const PADDING: f64 = 50.0;
/// Radius of one mark.
pub const MARK_RADIUS: f64 = 6.0;
/// Distance between the plot area edge and an axis line.
pub const AXIS_OFFSET: f64 = 10.0;
/// Smallest vertical plot extent; the surface is never shorter than two paddings plus this.
pub const MIN_PLOT_HEIGHT: f64 = 20.0;

/// Tunables for [`Layout::for_viewport`].
/// All fields are finite and positive, `width_fraction` is in `(0, 1]`;
/// see [`LayoutConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub max_width: f64,
    pub width_fraction: f64,
    pub aspect_ratio: f64,
    pub padding: f64,
    pub mark_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_WIDTH,
            width_fraction: WIDTH_FRACTION,
            aspect_ratio: ASPECT_RATIO,
            padding: PADDING,
            mark_radius: MARK_RADIUS,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_width", self.max_width),
            ("width_fraction", self.width_fraction),
            ("aspect_ratio", self.aspect_ratio),
            ("padding", self.padding),
            ("mark_radius", self.mark_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!("layout.{name} must be a positive number, got {value}")));
            }
        }
        if self.width_fraction > 1.0 {
            return Err(Error::Config(format!(
                "layout.width_fraction must not exceed 1, got {}",
                self.width_fraction
            )));
        }
        Ok(())
    }
}

/// Pixel geometry of one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub mark_radius: f64,
}

impl Layout {
    pub const fn new(width: f64, height: f64, padding: f64) -> Self {
        Self { width, height, padding, mark_radius: MARK_RADIUS }
    }

    pub fn with_mark_radius(mut self, mark_radius: f64) -> Self {
        self.mark_radius = mark_radius;
        self
    }

    /// Derive the surface from the available viewport width.
    ///
    /// The width is capped at `max_width` and never drops below four paddings;
    /// the height never drops below two paddings plus [`MIN_PLOT_HEIGHT`], so
    /// the plot area keeps a positive extent on tiny viewports.
    pub fn for_viewport(viewport_width: f64, cfg: &LayoutConfig) -> Self {
        let avail = if viewport_width.is_nan() { 0.0 } else { viewport_width.max(0.0) };
        let width = (avail * cfg.width_fraction).min(cfg.max_width).max(cfg.padding * 4.0);
        let height = (width * cfg.aspect_ratio).max(cfg.padding * 2.0 + MIN_PLOT_HEIGHT);
        Self::new(width, height, cfg.padding).with_mark_radius(cfg.mark_radius)
    }

    pub fn plot_left(&self) -> f64 {
        self.padding
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.padding
    }

    pub fn plot_top(&self) -> f64 {
        self.padding
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.padding
    }

    /// Anchor row for the legend entries.
    pub fn legend_row(&self) -> f64 {
        self.height / 1.5
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_viewport(f64::INFINITY, &LayoutConfig::default())
    }
}
