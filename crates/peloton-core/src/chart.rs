// File: crates/peloton-core/src/chart.rs
// Summary: Plot renderer: marks, title, axes and legend drawn into a Scene, plus state dispatch.

use crate::axis::Axis;
use crate::interaction::{tooltip_node, Tooltip};
use crate::layout::Layout;
use crate::record::{Category, Dataset};
use crate::scale::Scales;
use crate::scene::{Anchor, Baseline, Node, Scene};
use crate::theme::Theme;
use crate::view::ViewState;

/// Class carried by every mark node.
pub const MARK_CLASS: &str = "dot";
/// Format of the fixed-epoch `data-yvalue` attribute.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const DEFAULT_TITLE: &str = "Tour de France Time vs Year";
pub const ALLEGED_LABEL: &str = "Doping Allegations";
pub const CLEAN_LABEL: &str = "No Doping Allegations";

const TITLE_SIZE: f64 = 24.0;
const LEGEND_SIZE: f64 = 14.4;
const MESSAGE_SIZE: f64 = 24.0;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub theme: Theme,
    pub title: String,
    pub alleged_label: String,
    pub clean_label: String,
    /// Tooltip line for records without an allegation.
    pub no_allegation_text: String,
    pub loading_text: String,
    pub empty_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            title: DEFAULT_TITLE.to_string(),
            alleged_label: ALLEGED_LABEL.to_string(),
            clean_label: CLEAN_LABEL.to_string(),
            no_allegation_text: CLEAN_LABEL.to_string(),
            loading_text: "Loading...".to_string(),
            empty_text: "No records to display".to_string(),
        }
    }
}

pub struct PlotRenderer<'a> {
    opts: &'a RenderOptions,
}

impl<'a> PlotRenderer<'a> {
    pub fn new(opts: &'a RenderOptions) -> Self {
        Self { opts }
    }

    /// Draw the full chart for `dataset`. Prior scene content is discarded first,
    /// so repeated calls with the same inputs produce the same scene.
    pub fn render(&self, scene: &mut Scene, dataset: &Dataset, scales: &Scales, layout: &Layout) {
        let theme = &self.opts.theme;
        scene.reset(layout.width, layout.height, theme.background);

        for (i, r) in dataset.records().iter().enumerate() {
            let (cx, cy) = scales.position(r);
            scene.push(
                Node::circle(cx, cy, layout.mark_radius, theme.category_color(r.category()))
                    .with_class(MARK_CLASS)
                    .with_data("xvalue", r.year)
                    .with_data("yvalue", r.time.timestamp().format(TIMESTAMP_FORMAT))
                    .with_data("time", r.time)
                    .with_data("index", i),
            );
        }

        scene.push(self.title_node(layout));
        scene.push(Axis::years(scales, layout).to_node(theme));
        scene.push(Axis::times(scales, layout).to_node(theme));
        scene.push(self.legend_node(layout));
        scene.push(tooltip_node(&Tooltip::hidden(), theme));
        tracing::debug!(marks = dataset.len(), "rendered chart");
    }

    /// Replace the scene with a single centered message.
    pub fn render_message(&self, scene: &mut Scene, layout: &Layout, text: &str) {
        let theme = &self.opts.theme;
        scene.reset(layout.width, layout.height, theme.background);
        scene.push(self.message_node(layout, text));
    }

    /// Pure dispatch over the view state.
    pub fn compose(&self, scene: &mut Scene, state: &ViewState, layout: &Layout) {
        match state {
            ViewState::Loading => self.render_message(scene, layout, &self.opts.loading_text),
            ViewState::Failed(message) => self.render_message(scene, layout, message),
            ViewState::Loaded(dataset) => match Scales::for_dataset(dataset, layout) {
                Some(scales) => self.render(scene, dataset, &scales, layout),
                None => {
                    let theme = &self.opts.theme;
                    scene.reset(layout.width, layout.height, theme.background);
                    scene.push(self.title_node(layout));
                    scene.push(self.legend_node(layout));
                    scene.push(self.message_node(layout, &self.opts.empty_text));
                }
            },
        }
    }

    fn title_node(&self, layout: &Layout) -> Node {
        Node::text(layout.width / 2.0, layout.padding / 2.0, &self.opts.title, TITLE_SIZE, self.opts.theme.title)
            .aligned(Anchor::Middle, Baseline::Middle)
            .bold()
            .with_id("title")
    }

    fn message_node(&self, layout: &Layout, text: &str) -> Node {
        Node::text(layout.width / 2.0, layout.height / 2.0, text, MESSAGE_SIZE, self.opts.theme.message)
            .aligned(Anchor::Middle, Baseline::Middle)
            .bold()
            .with_id("message")
    }

    fn legend_node(&self, layout: &Layout) -> Node {
        let theme = &self.opts.theme;
        let row = layout.legend_row();
        let swatch_x = layout.width - 160.0;
        let label_x = layout.width - 150.0;
        let entry = |category: Category, label: &str, swatch_y: f64, label_y: f64| {
            Node::group(
                0.0,
                0.0,
                vec![
                    Node::circle(swatch_x, swatch_y, layout.mark_radius, theme.category_color(category)),
                    Node::text(label_x, label_y, label, LEGEND_SIZE, theme.legend_label)
                        .aligned(Anchor::Start, Baseline::Middle),
                ],
            )
            .with_class("legend-item")
            .with_data("category", category_key(category))
        };
        Node::group(
            0.0,
            0.0,
            vec![
                entry(Category::Alleged, &self.opts.alleged_label, row - 17.0, row - 16.0),
                entry(Category::Clean, &self.opts.clean_label, row + 11.0, row + 14.0),
            ],
        )
        .with_id("legend")
    }
}

fn category_key(category: Category) -> &'static str {
    match category {
        Category::Alleged => "alleged",
        Category::Clean => "clean",
    }
}
