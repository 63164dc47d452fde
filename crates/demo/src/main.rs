// File: crates/demo/src/main.rs
// Summary: Demo loads the cyclist dataset (URL or file) and writes the chart to SVG and PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use peloton_core::scene::Shape;
use peloton_core::source::source_for;
use peloton_core::{raster, svg, ChartView, Config, ViewState};

#[derive(Parser, Debug)]
#[command(name = "peloton-demo", about = "Render race times vs. year, colored by doping allegation")]
struct Cli {
    /// Config file (TOML); defaults to $PELOTON_CONFIG or ./peloton.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset URL or local JSON path; overrides the config.
    #[arg(long)]
    input: Option<String>,
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,
    /// Width of the simulated viewport the layout is derived from.
    #[arg(long, default_value_t = 1024.0)]
    viewport_width: f64,
    /// Theme preset: dark, light, high-contrast-dark.
    #[arg(long)]
    theme: Option<String>,
    /// Render with the tooltip shown for the first record of this year.
    #[arg(long)]
    hover_year: Option<i32>,
    /// Skip the PNG (Skia) output.
    #[arg(long)]
    no_png: bool,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();

    let cli = Cli::parse();
    let mut config = Config::parse(cli.config.clone()).context("failed to load configuration")?;
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    let source = match &cli.input {
        Some(input) => source_for(input, config.timeout()),
        None => config.source(),
    };
    tracing::info!(source = %source.describe(), "loading dataset");

    let mut view = ChartView::new(config.render_options(), config.layout, cli.viewport_width);
    let ticket = view.begin_load();
    let result = source.load();
    view.finish_load(ticket, result);

    if let Some(year) = cli.hover_year {
        hover_first_of_year(&mut view, year);
    }

    let stem = out_stem(&view);
    let out_svg = cli.out_dir.join(format!("{stem}.svg"));
    svg::write_svg(view.scene(), &out_svg).with_context(|| format!("writing {}", out_svg.display()))?;
    tracing::info!(path = %out_svg.display(), "wrote svg");

    if !cli.no_png {
        let out_png = out_svg.with_extension("png");
        raster::render_to_png(view.scene(), &out_png).with_context(|| format!("writing {}", out_png.display()))?;
        tracing::info!(path = %out_png.display(), "wrote png");
    }

    match view.state() {
        ViewState::Failed(message) => anyhow::bail!("{message}"),
        ViewState::Loaded(ds) => {
            tracing::info!(marks = view.scene().marks().len(), skipped = ds.skipped().len(), "done");
            Ok(())
        }
        ViewState::Loading => anyhow::bail!("load did not complete"),
    }
}

/// Move the pointer onto the first mark of `year`, as a hover would.
fn hover_first_of_year(view: &mut ChartView, year: i32) {
    let Some(index) = view
        .state()
        .dataset()
        .and_then(|ds| ds.records().iter().position(|r| r.year == year))
    else {
        tracing::warn!(year, "no record for hover year");
        return;
    };
    let centre = view.scene().marks().get(index).and_then(|m| match m.shape {
        Shape::Circle { cx, cy, .. } => Some((cx, cy)),
        _ => None,
    });
    if let Some(point) = centre {
        let hover = view.pointer_moved(point);
        tracing::info!(?hover, tooltip = %view.tooltip().text(), "hovered mark");
    }
}

/// Output file stem like chart_loaded / chart_failed.
fn out_stem(view: &ChartView) -> String {
    let state = match view.state() {
        ViewState::Loading => "loading",
        ViewState::Failed(_) => "failed",
        ViewState::Loaded(_) => "loaded",
    };
    let layout = view.layout();
    format!("chart_{state}_{}x{}", layout.width.round(), layout.height.round())
}
