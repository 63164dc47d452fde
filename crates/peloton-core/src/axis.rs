// File: crates/peloton-core/src/axis.rs
// Summary: Axis model (bottom year axis, left MM:SS axis) with ticks and labels.

use crate::layout::{Layout, AXIS_OFFSET};
use crate::scale::Scales;
use crate::scene::{Anchor, Baseline, Node};
use crate::theme::Theme;

/// Target tick count per axis.
pub const TICK_COUNT: usize = 10;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const LABEL_SIZE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub pos: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub id: &'static str,
    pub orientation: Orientation,
    /// Offset of the axis line from the surface origin, across the axis.
    pub offset: f64,
    /// Pixel extent of the domain line, along the axis.
    pub extent: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Calendar years below the plot area.
    pub fn years(scales: &Scales, layout: &Layout) -> Self {
        let ticks = scales
            .year_ticks(TICK_COUNT)
            .into_iter()
            .map(|y| Tick { pos: scales.x_px(y), label: y.to_string() })
            .collect();
        Self {
            id: "x-axis",
            orientation: Orientation::Bottom,
            offset: layout.plot_bottom() + AXIS_OFFSET,
            extent: (layout.plot_left(), layout.plot_right()),
            ticks,
        }
    }

    /// Race times left of the plot area.
    pub fn times(scales: &Scales, layout: &Layout) -> Self {
        let ticks = scales
            .time_ticks(TICK_COUNT)
            .into_iter()
            .map(|t| Tick { pos: scales.y_px(t), label: t.to_string() })
            .collect();
        Self {
            id: "y-axis",
            orientation: Orientation::Left,
            offset: layout.plot_left() - AXIS_OFFSET,
            extent: (layout.plot_top(), layout.plot_bottom()),
            ticks,
        }
    }

    pub fn to_node(&self, theme: &Theme) -> Node {
        let mut children = Vec::with_capacity(self.ticks.len() + 1);
        let (a, b) = self.extent;
        match self.orientation {
            Orientation::Bottom => {
                children.push(Node::line((a, 0.0), (b, 0.0), theme.axis_line, 1.0).with_class("domain"));
                for t in &self.ticks {
                    children.push(Node::group(
                        t.pos,
                        0.0,
                        vec![
                            Node::line((0.0, 0.0), (0.0, TICK_SIZE), theme.axis_line, 1.0),
                            Node::text(0.0, TICK_SIZE + TICK_PADDING, &t.label, LABEL_SIZE, theme.tick_label)
                                .aligned(Anchor::Middle, Baseline::Hanging),
                        ],
                    )
                    .with_class("tick")
                    .with_data("value", &t.label));
                }
                Node::group(0.0, self.offset, children).with_id(self.id)
            }
            Orientation::Left => {
                children.push(Node::line((0.0, a), (0.0, b), theme.axis_line, 1.0).with_class("domain"));
                for t in &self.ticks {
                    children.push(Node::group(
                        0.0,
                        t.pos,
                        vec![
                            Node::line((-TICK_SIZE, 0.0), (0.0, 0.0), theme.axis_line, 1.0),
                            Node::text(-(TICK_SIZE + TICK_PADDING), 0.0, &t.label, LABEL_SIZE, theme.tick_label)
                                .aligned(Anchor::End, Baseline::Middle),
                        ],
                    )
                    .with_class("tick")
                    .with_data("value", &t.label));
                }
                Node::group(self.offset, 0.0, children).with_id(self.id)
            }
        }
    }
}
