// File: crates/peloton-core/src/view.rs
// First-class view state: load lifecycle, responsive layout, scene and hover wiring.

use crate::chart::{PlotRenderer, RenderOptions};
use crate::error::Error;
use crate::interaction::{apply_tooltip, Hover, HoverTracker, Tooltip};
use crate::layout::{Layout, LayoutConfig};
use crate::record::Dataset;
use crate::scene::Scene;

/// What the view currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Loaded(Dataset),
}

impl ViewState {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            ViewState::Loaded(ds) => Some(ds),
            ViewState::Loading | ViewState::Failed(_) => None,
        }
    }
}

/// Identifies one load attempt; stale tickets are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket(u64);

pub struct ChartView {
    state: ViewState,
    options: RenderOptions,
    layout_config: LayoutConfig,
    layout: Layout,
    scene: Scene,
    hover: HoverTracker,
    tooltip: Tooltip,
    generation: u64,
    mounted: bool,
}

impl ChartView {
    pub fn new(options: RenderOptions, layout_config: LayoutConfig, viewport_width: f64) -> Self {
        let layout = Layout::for_viewport(viewport_width, &layout_config);
        let scene = Scene::new(layout.width, layout.height, options.theme.background);
        let mut view = Self {
            state: ViewState::Loading,
            options,
            layout_config,
            layout,
            scene,
            hover: HoverTracker::default(),
            tooltip: Tooltip::hidden(),
            generation: 0,
            mounted: true,
        };
        view.rerender();
        view
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Enter `Loading` and issue the ticket the result must be delivered with.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.set_state(ViewState::Loading);
        LoadTicket(self.generation)
    }

    /// Deliver a load result. Returns `false`, changing nothing, when the view
    /// was unmounted or a newer load has started since `ticket` was issued.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Dataset, Error>) -> bool {
        if !self.mounted || ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "ignoring late load result");
            return false;
        }
        let next = match result {
            Ok(dataset) => {
                tracing::info!(records = dataset.len(), skipped = dataset.skipped().len(), "dataset loaded");
                ViewState::Loaded(dataset)
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset load failed");
                ViewState::Failed(e.to_string())
            }
        };
        self.set_state(next);
        true
    }

    /// Re-derive the layout from a new viewport width and redraw.
    pub fn resize(&mut self, viewport_width: f64) {
        let layout = Layout::for_viewport(viewport_width, &self.layout_config);
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.clear_hover();
        self.rerender();
    }

    pub fn pointer_moved(&mut self, point: (f64, f64)) -> Hover {
        if !self.mounted {
            return Hover::None;
        }
        let transition = self.hover.pointer_moved(&self.scene, point);
        match transition {
            Hover::Enter(to) | Hover::Switch { to, .. } => self.show_tooltip(to, point),
            Hover::Leave(_) => self.hide_tooltip(),
            Hover::None => {}
        }
        transition
    }

    pub fn pointer_left(&mut self) -> Hover {
        let transition = self.hover.pointer_left();
        if let Hover::Leave(_) = transition {
            self.hide_tooltip();
        }
        transition
    }

    /// Tear the view down; later load results become no-ops.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.clear_hover();
        self.scene.clear();
    }

    fn set_state(&mut self, state: ViewState) {
        self.state = state;
        self.clear_hover();
        self.rerender();
    }

    fn rerender(&mut self) {
        if !self.mounted {
            return;
        }
        PlotRenderer::new(&self.options).compose(&mut self.scene, &self.state, &self.layout);
    }

    fn show_tooltip(&mut self, mark: usize, point: (f64, f64)) {
        let Some(record) = self.state.dataset().and_then(|ds| ds.get(mark)) else {
            return;
        };
        self.tooltip = self.tooltip.on_enter(mark, record, point, &self.options.no_allegation_text);
        apply_tooltip(&mut self.scene, &self.tooltip, &self.options.theme);
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = self.tooltip.on_leave();
        apply_tooltip(&mut self.scene, &self.tooltip, &self.options.theme);
    }

    fn clear_hover(&mut self) {
        self.hover.reset();
        self.tooltip = Tooltip::hidden();
    }
}
