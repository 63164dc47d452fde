// File: crates/peloton-core/src/interaction.rs
// Summary: Hover interaction: mark hit-testing, enter/leave transitions and the single tooltip.

use crate::record::Record;
use crate::scene::{Anchor, Baseline, Node, Scene, Shape};
use crate::theme::Theme;

pub const TOOLTIP_ID: &str = "tooltip";
/// Tooltip position relative to the pointer.
pub const POINTER_OFFSET: (f64, f64) = (10.0, -30.0);

const LINE_HEIGHT: f64 = 16.0;
const TEXT_SIZE: f64 = 12.0;
const INSET: f64 = 8.0;
// rough advance per character; the box only needs to cover the text
const CHAR_WIDTH: f64 = 7.0;

/// The one tooltip instance. Hidden unless a mark is hovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    /// Mark index the tooltip describes.
    pub mark: Option<usize>,
    pub year: Option<i32>,
}

impl Tooltip {
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Show `record` next to the pointer.
    pub fn on_enter(&self, mark: usize, record: &Record, pointer: (f64, f64), no_allegation_text: &str) -> Self {
        let mut lines = Vec::with_capacity(4);
        if let Some(name) = &record.name {
            match &record.nationality {
                Some(nat) => lines.push(format!("{name}: {nat}")),
                None => lines.push(name.clone()),
            }
        }
        lines.push(format!("Year: {}", record.year));
        lines.push(format!("Time: {}", record.time));
        lines.push(record.doping.clone().unwrap_or_else(|| no_allegation_text.to_string()));
        Self {
            visible: true,
            x: pointer.0 + POINTER_OFFSET.0,
            y: pointer.1 + POINTER_OFFSET.1,
            lines,
            mark: Some(mark),
            year: Some(record.year),
        }
    }

    pub fn on_leave(&self) -> Self {
        Self::hidden()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Scene node for `tooltip`; always present, opacity 0 while hidden.
pub fn tooltip_node(tooltip: &Tooltip, theme: &Theme) -> Node {
    let longest = tooltip.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = longest as f64 * CHAR_WIDTH + 2.0 * INSET;
    let height = tooltip.lines.len() as f64 * LINE_HEIGHT + 2.0 * INSET;
    let mut children = vec![Node::rect(0.0, 0.0, width, height, 4.0, theme.tooltip_background)];
    for (i, line) in tooltip.lines.iter().enumerate() {
        children.push(
            Node::text(INSET, INSET + i as f64 * LINE_HEIGHT, line, TEXT_SIZE, theme.tooltip_text)
                .aligned(Anchor::Start, Baseline::Hanging),
        );
    }
    let mut node = Node::group(tooltip.x, tooltip.y, children)
        .with_id(TOOLTIP_ID)
        .with_opacity(if tooltip.visible { 1.0 } else { 0.0 });
    if let Some(year) = tooltip.year {
        node = node.with_data("year", year);
    }
    node
}

/// Rewrite the tooltip node in place; marks are left untouched.
pub fn apply_tooltip(scene: &mut Scene, tooltip: &Tooltip, theme: &Theme) {
    if let Some(node) = scene.find_mut(TOOLTIP_ID) {
        *node = tooltip_node(tooltip, theme);
    }
}

/// Index of the topmost mark under `point`.
pub fn hit_test(scene: &Scene, point: (f64, f64)) -> Option<usize> {
    scene.marks().iter().rposition(|m| match m.shape {
        Shape::Circle { cx, cy, r, .. } => {
            let (dx, dy) = (point.0 - cx, point.1 - cy);
            dx * dx + dy * dy <= r * r
        }
        _ => false,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hover {
    None,
    Enter(usize),
    Leave(usize),
    /// Pointer went straight from one mark onto another.
    Switch { from: usize, to: usize },
}

/// Tracks which mark, if any, is under the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    hovered: Option<usize>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn pointer_moved(&mut self, scene: &Scene, point: (f64, f64)) -> Hover {
        let hit = hit_test(scene, point);
        let transition = match (self.hovered, hit) {
            (None, None) => Hover::None,
            (None, Some(to)) => Hover::Enter(to),
            (Some(from), None) => Hover::Leave(from),
            (Some(from), Some(to)) if from == to => Hover::None,
            (Some(from), Some(to)) => Hover::Switch { from, to },
        };
        self.hovered = hit;
        transition
    }

    pub fn pointer_left(&mut self) -> Hover {
        match self.hovered.take() {
            Some(from) => Hover::Leave(from),
            None => Hover::None,
        }
    }

    pub fn reset(&mut self) {
        self.hovered = None;
    }
}
