// File: crates/peloton-core/src/lib.rs
// Summary: Core library entry point; exports the data, scale, render and interaction API.

pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod raster;
pub mod record;
pub mod scale;
pub mod scene;
pub mod source;
pub mod svg;
pub mod text;
pub mod theme;
pub mod view;

pub use chart::{PlotRenderer, RenderOptions};
pub use config::Config;
pub use error::{Error, Result};
pub use interaction::{Hover, HoverTracker, Tooltip};
pub use layout::{Layout, LayoutConfig};
pub use record::{Category, Dataset, DomainBounds, RaceTime, Record};
pub use scale::{LinearScale, ScaleBuilder, Scales};
pub use scene::{Node, Rgba, Scene};
pub use source::{load_in_background, DataSource, FileSource, HttpSource};
pub use theme::Theme;
pub use view::{ChartView, LoadTicket, ViewState};
