// File: crates/peloton-core/tests/smoke.rs
// Purpose: End-to-end smoke test: fixture -> view -> PNG and SVG on disk.

use peloton_core::{raster, svg, ChartView, Dataset, LayoutConfig, RenderOptions};

fn loaded_view() -> ChartView {
    let ds = Dataset::from_json(include_str!("fixtures/cyclists.json")).expect("fixture");
    let mut view = ChartView::new(RenderOptions::default(), LayoutConfig::default(), 1024.0);
    let ticket = view.begin_load();
    assert!(view.finish_load(ticket, Ok(ds)));
    view
}

#[test]
fn render_smoke_png() {
    let view = loaded_view();
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("chart.png");

    raster::render_to_png(view.scene(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = raster::render_to_png_bytes(view.scene()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decodes").to_rgba8();
    assert_eq!((img.width(), img.height()), (800, 480));
}

#[test]
fn rgba_buffer_matches_surface() {
    let view = loaded_view();
    let (pixels, w, h, row_bytes) = raster::render_to_rgba8(view.scene()).expect("rgba");
    assert_eq!((w, h), (800, 480));
    assert_eq!(row_bytes, 800 * 4);
    assert_eq!(pixels.len(), row_bytes * h as usize);

    // corner pixel is the background
    let bg = view.scene().background;
    assert_eq!(&pixels[..4], &[bg.r, bg.g, bg.b, 255]);
}

#[test]
fn svg_export_keeps_marks_inspectable() {
    let view = loaded_view();
    let doc = svg::to_svg(view.scene());
    assert!(doc.starts_with("<svg"));
    assert_eq!(doc.matches(r#"class="dot""#).count(), 6);
    assert!(doc.contains(r#"data-xvalue="1998""#));
    assert!(doc.contains(r#"id="tooltip""#));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/chart.svg");
    svg::write_svg(view.scene(), &path).expect("write svg");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), doc);
}
