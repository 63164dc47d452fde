// File: crates/window-demo/src/main.rs
// Summary: Windowed demo that renders the chart via RGBA blit (CPU) using winit + softbuffer,
// with the dataset fetched on a worker thread and hover tooltips driven by cursor events.

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use peloton_core::source::source_for;
use peloton_core::{load_in_background, raster, ChartView, Config, Dataset, Hover, LoadTicket, Scene};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::{Window, WindowBuilder};

#[derive(Parser, Debug)]
#[command(name = "peloton-window-demo", about = "Interactive race time chart")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset URL or local JSON path; overrides the config.
    #[arg(long)]
    input: Option<String>,
}

enum AppEvent {
    Loaded(LoadTicket, peloton_core::Result<Dataset>),
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
    let config = Config::parse(cli.config).context("failed to load configuration")?;
    let source = match &cli.input {
        Some(input) => source_for(input, config.timeout()),
        None => config.source(),
    };

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();
    let window = WindowBuilder::new()
        .with_title("Peloton Chart")
        .with_inner_size(LogicalSize::new(900.0, 560.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let mut view = ChartView::new(config.render_options(), config.layout, f64::from(window.inner_size().width));
    let ticket = view.begin_load();
    tracing::info!(source = %source.describe(), "loading dataset");
    load_in_background(source, move |result| {
        // the window may already be gone
        if proxy.send_event(AppEvent::Loaded(ticket, result)).is_err() {
            tracing::debug!("event loop closed before the dataset arrived");
        }
    })
    .context("spawn loader thread")?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    view.unmount();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    view.resize(f64::from(size.width));
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    if view.pointer_moved((position.x, position.y)) != Hover::None {
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    if view.pointer_left() != Hover::None {
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::UserEvent(AppEvent::Loaded(ticket, result)) => {
                if view.finish_load(ticket, result) {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut surface, &window, view.scene()) {
                    tracing::error!(error = %e, "present failed");
                }
            }
            _ => {}
        }
    })
}

/// Rasterize `scene` and blit it to the top-left of the window, filling the rest with its background.
fn present(surface: &mut softbuffer::Surface, window: &Window, scene: &Scene) -> Result<()> {
    let size = window.inner_size();
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize: {e}"))?;

    let (rgba, sw, sh, row_bytes) = raster::render_to_rgba8(scene)?;
    let bg = scene.background;
    let fill = (u32::from(bg.r) << 16) | (u32::from(bg.g) << 8) | u32::from(bg.b);

    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("buffer: {e}"))?;
    let (w, h) = (w.get() as usize, h.get() as usize);
    for y in 0..h {
        for x in 0..w {
            frame[y * w + x] = if x < sw as usize && y < sh as usize {
                let i = y * row_bytes + x * 4;
                (u32::from(rgba[i]) << 16) | (u32::from(rgba[i + 1]) << 8) | u32::from(rgba[i + 2])
            } else {
                fill
            };
        }
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}
