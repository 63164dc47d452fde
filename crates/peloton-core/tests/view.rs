// File: crates/peloton-core/tests/view.rs
// Purpose: View lifecycle: loading, failure, late results, unmount, resize and hover wiring.

use peloton_core::scene::Shape;
use peloton_core::{ChartView, Dataset, Error, Hover, LayoutConfig, Node, Record, RenderOptions, ViewState};

fn dataset() -> Dataset {
    Dataset::new(vec![
        Record::new(1994, "40:00".parse().unwrap(), ""),
        Record::new(1998, "39:00".parse().unwrap(), "EPO"),
        Record::new(2005, "38:30".parse().unwrap(), ""),
    ])
}

fn view() -> ChartView {
    ChartView::new(RenderOptions::default(), LayoutConfig::default(), 1920.0)
}

fn loaded_view() -> ChartView {
    let mut v = view();
    let ticket = v.begin_load();
    assert!(v.finish_load(ticket, Ok(dataset())));
    v
}

fn centre(node: &Node) -> (f64, f64) {
    match node.shape {
        Shape::Circle { cx, cy, .. } => (cx, cy),
        _ => panic!("not a circle"),
    }
}

fn tooltip_opacity(v: &ChartView) -> f64 {
    match v.scene().find("tooltip").expect("tooltip").shape {
        Shape::Group { opacity, .. } => opacity,
        _ => panic!("tooltip is a group"),
    }
}

#[test]
fn starts_loading_without_marks() {
    let v = view();
    assert_eq!(v.state(), &ViewState::Loading);
    assert!(v.scene().marks().is_empty());
    assert_eq!(v.scene().find("message").map(Node::text_content).as_deref(), Some("Loading..."));
    assert_eq!((v.layout().width, v.layout().height), (800.0, 480.0));
}

#[test]
fn successful_load_draws_one_mark_per_record() {
    let v = loaded_view();
    assert!(matches!(v.state(), ViewState::Loaded(ds) if ds.len() == 3));
    assert_eq!(v.scene().marks().len(), 3);
    assert!(v.scene().find("message").is_none());
}

#[test]
fn failed_load_shows_message_and_no_marks() {
    let mut v = view();
    let ticket = v.begin_load();
    assert!(v.finish_load(ticket, Err(Error::Network("connection refused".into()))));
    assert_eq!(v.state(), &ViewState::Failed("Failed to fetch data: connection refused".into()));
    assert!(v.scene().marks().is_empty());
    assert!(v.scene().find("x-axis").is_none());
    assert_eq!(
        v.scene().find("message").map(Node::text_content).as_deref(),
        Some("Failed to fetch data: connection refused")
    );
}

#[test]
fn stale_result_is_ignored() {
    let mut v = view();
    let first = v.begin_load();
    let second = v.begin_load();
    assert!(!v.finish_load(first, Ok(dataset())));
    assert_eq!(v.state(), &ViewState::Loading);
    assert!(v.scene().marks().is_empty());

    assert!(v.finish_load(second, Ok(dataset())));
    assert_eq!(v.scene().marks().len(), 3);
}

#[test]
fn result_after_unmount_is_a_no_op() {
    let mut v = view();
    let ticket = v.begin_load();
    v.unmount();
    assert!(!v.is_mounted());
    assert!(!v.finish_load(ticket, Ok(dataset())));
    assert_eq!(v.state(), &ViewState::Loading);
    assert!(v.scene().is_empty());
    assert_eq!(v.pointer_moved((50.0, 50.0)), Hover::None);
}

#[test]
fn resize_relayouts_marks() {
    let mut v = loaded_view();
    let last = centre(v.scene().marks()[2]);
    assert_eq!(last.0, 750.0);

    v.resize(500.0);
    assert_eq!(v.layout().width, 450.0);
    assert_eq!(v.scene().width, 450.0);
    assert_eq!(v.scene().marks().len(), 3);
    assert_eq!(centre(v.scene().marks()[2]).0, 400.0);
}

#[test]
fn hovering_a_mark_shows_its_tooltip() {
    let mut v = loaded_view();
    let marks_before: Vec<Node> = v.scene().marks().into_iter().cloned().collect();
    let target = centre(v.scene().marks()[1]);

    assert_eq!(v.pointer_moved(target), Hover::Enter(1));
    assert!(v.tooltip().visible);
    assert_eq!(v.tooltip().year, Some(1998));
    assert_eq!(v.tooltip().lines.last().map(String::as_str), Some("EPO"));
    assert_eq!(tooltip_opacity(&v), 1.0);

    let marks_after: Vec<Node> = v.scene().marks().into_iter().cloned().collect();
    assert_eq!(marks_before, marks_after);

    assert_eq!(v.pointer_moved((0.0, 0.0)), Hover::Leave(1));
    assert!(!v.tooltip().visible);
    assert_eq!(tooltip_opacity(&v), 0.0);
}

#[test]
fn clean_record_tooltip_uses_default_text() {
    let mut v = loaded_view();
    let target = centre(v.scene().marks()[0]);
    v.pointer_moved(target);
    assert_eq!(v.tooltip().lines, vec!["Year: 1994", "Time: 40:00", "No Doping Allegations"]);

    assert_eq!(v.pointer_left(), Hover::Leave(0));
    assert_eq!(tooltip_opacity(&v), 0.0);
}

#[test]
fn reload_hides_tooltip() {
    let mut v = loaded_view();
    let target = centre(v.scene().marks()[0]);
    v.pointer_moved(target);
    assert!(v.tooltip().visible);

    let _ = v.begin_load();
    assert!(!v.tooltip().visible);
    assert!(v.scene().marks().is_empty());
}

#[test]
fn resize_hides_tooltip_and_resets_hover() {
    let mut v = loaded_view();
    let before = centre(v.scene().marks()[2]);
    assert_eq!(v.pointer_moved(before), Hover::Enter(2));
    assert!(v.tooltip().visible);

    v.resize(500.0);
    assert!(!v.tooltip().visible);
    assert_eq!(tooltip_opacity(&v), 0.0);

    let after = centre(v.scene().marks()[2]);
    assert_ne!(before, after);
    assert_eq!(v.pointer_moved(after), Hover::Enter(2));
    assert!(v.tooltip().visible);
}

#[test]
fn mark_radius_comes_from_layout_config() {
    let cfg = LayoutConfig { mark_radius: 4.0, ..LayoutConfig::default() };
    let mut v = ChartView::new(RenderOptions::default(), cfg, 1920.0);
    let ticket = v.begin_load();
    assert!(v.finish_load(ticket, Ok(dataset())));
    assert_eq!(v.layout().mark_radius, 4.0);
    for m in v.scene().marks() {
        assert!(matches!(m.shape, Shape::Circle { r, .. } if r == 4.0));
    }
    let legend = v.scene().find("legend").expect("legend");
    let swatch_radii: Vec<f64> = legend
        .children()
        .iter()
        .flat_map(|item| item.children())
        .filter_map(|n| match n.shape {
            Shape::Circle { r, .. } => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(swatch_radii, vec![4.0, 4.0]);
}
