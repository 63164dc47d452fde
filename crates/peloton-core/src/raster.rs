// File: crates/peloton-core/src/raster.rs
// Summary: Headless rasterization of a Scene using Skia CPU raster surfaces (PNG, RGBA8).

use skia_safe as skia;

use crate::error::{Error, Result};
use crate::scene::{Node, Rgba, Scene, Shape};
use crate::text::TextShaper;

/// Render `scene` and return `(pixels, width, height, row_bytes)` in unpremultiplied RGBA8.
pub fn render_to_rgba8(scene: &Scene) -> Result<(Vec<u8>, u32, u32, usize)> {
    let (w, h) = surface_size(scene);
    let mut surface = paint(scene)?;
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(Error::Render("reading surface pixels failed".into()));
    }
    Ok((pixels, w as u32, h as u32, row_bytes))
}

pub fn render_to_png_bytes(scene: &Scene) -> Result<Vec<u8>> {
    let mut surface = paint(scene)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| Error::Render("encode PNG failed".into()))?;
    Ok(data.as_bytes().to_vec())
}

/// Render `scene` to a PNG at `output_png_path`.
pub fn render_to_png(scene: &Scene, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_to_png_bytes(scene)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

fn surface_size(scene: &Scene) -> (i32, i32) {
    (scene.width.round().max(1.0) as i32, scene.height.round().max(1.0) as i32)
}

fn paint(scene: &Scene) -> Result<skia::Surface> {
    let mut surface = skia::surfaces::raster_n32_premul(surface_size(scene))
        .ok_or_else(|| Error::Render("failed to create raster surface".into()))?;
    let shaper = TextShaper::new();
    let canvas = surface.canvas();
    canvas.clear(color(scene.background, 1.0));
    for n in scene.nodes() {
        paint_node(canvas, &shaper, n, 1.0);
    }
    Ok(surface)
}

fn color(c: Rgba, opacity: f64) -> skia::Color {
    let a = (f64::from(c.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

fn fill_paint(c: Rgba, opacity: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c, opacity));
    paint
}

fn paint_node(canvas: &skia::Canvas, shaper: &TextShaper, node: &Node, opacity: f64) {
    match &node.shape {
        Shape::Rect { x, y, width, height, radius, fill } => {
            let rect = skia::Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32);
            canvas.draw_round_rect(rect, *radius as f32, *radius as f32, &fill_paint(*fill, opacity));
        }
        Shape::Circle { cx, cy, r, fill } => {
            canvas.draw_circle((*cx as f32, *cy as f32), *r as f32, &fill_paint(*fill, opacity));
        }
        Shape::Line { x1, y1, x2, y2, stroke, width } => {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_style(skia::paint::Style::Stroke);
            paint.set_stroke_width(*width as f32);
            paint.set_color(color(*stroke, opacity));
            canvas.draw_line((*x1 as f32, *y1 as f32), (*x2 as f32, *y2 as f32), &paint);
        }
        Shape::Text { x, y, content, size, fill, anchor, baseline, bold } => {
            shaper.draw(
                canvas,
                content,
                (*x as f32, *y as f32),
                *size as f32,
                color(*fill, opacity),
                *anchor,
                *baseline,
                *bold,
            );
        }
        Shape::Group { dx, dy, opacity: own, children } => {
            let alpha = opacity * own;
            if alpha <= 0.0 {
                return;
            }
            canvas.save();
            canvas.translate((*dx as f32, *dy as f32));
            for c in children {
                paint_node(canvas, shaper, c, alpha);
            }
            canvas.restore();
        }
    }
}
