// File: crates/peloton-core/src/scene.rs
// Summary: Retained vector scene (the drawable surface) with identifiable, inspectable nodes.
// Notes:
// - Exporters (SVG text, Skia raster) walk the same node tree, so tests can assert
//   on structure without decoding pixels.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
    Hanging,
}

/// Identity attributes carried by every node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs {
    pub id: Option<String>,
    pub class: Option<String>,
    /// `data-*` attributes, in insertion order.
    pub data: Vec<(String, String)>,
}

impl Attrs {
    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64, radius: f64, fill: Rgba },
    Circle { cx: f64, cy: f64, r: f64, fill: Rgba },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, width: f64 },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        fill: Rgba,
        anchor: Anchor,
        baseline: Baseline,
        bold: bool,
    },
    /// Children are offset by `(dx, dy)` and drawn with `opacity`.
    Group { dx: f64, dy: f64, opacity: f64, children: Vec<Node> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub attrs: Attrs,
    pub shape: Shape,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self { attrs: Attrs::default(), shape }
    }

    pub fn circle(cx: f64, cy: f64, r: f64, fill: Rgba) -> Self {
        Self::new(Shape::Circle { cx, cy, r, fill })
    }

    pub fn line(from: (f64, f64), to: (f64, f64), stroke: Rgba, width: f64) -> Self {
        Self::new(Shape::Line { x1: from.0, y1: from.1, x2: to.0, y2: to.1, stroke, width })
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, radius: f64, fill: Rgba) -> Self {
        Self::new(Shape::Rect { x, y, width, height, radius, fill })
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>, size: f64, fill: Rgba) -> Self {
        Self::new(Shape::Text {
            x,
            y,
            content: content.into(),
            size,
            fill,
            anchor: Anchor::Start,
            baseline: Baseline::Alphabetic,
            bold: false,
        })
    }

    pub fn group(dx: f64, dy: f64, children: Vec<Node>) -> Self {
        Self::new(Shape::Group { dx, dy, opacity: 1.0, children })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attrs.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.attrs.class = Some(class.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.data.push((key.into(), value.to_string()));
        self
    }

    /// Text alignment; no-op on non-text shapes.
    pub fn aligned(mut self, a: Anchor, b: Baseline) -> Self {
        if let Shape::Text { anchor, baseline, .. } = &mut self.shape {
            *anchor = a;
            *baseline = b;
        }
        self
    }

    pub fn bold(mut self) -> Self {
        if let Shape::Text { bold, .. } = &mut self.shape {
            *bold = true;
        }
        self
    }

    /// No-op on non-group shapes.
    pub fn with_opacity(mut self, value: f64) -> Self {
        if let Shape::Group { opacity, .. } = &mut self.shape {
            *opacity = value;
        }
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attrs.class.as_deref() == Some(class)
    }

    pub fn children(&self) -> &[Node] {
        match &self.shape {
            Shape::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content of this node and its descendants, one line per text node.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines.join("\n")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.shape {
            Shape::Text { content, .. } => out.push(content),
            Shape::Group { children, .. } => children.iter().for_each(|c| c.collect_text(out)),
            _ => {}
        }
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for c in self.children() {
            c.walk(visit);
        }
    }
}

/// The drawable target of a render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Rgba,
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Rgba) -> Self {
        Self { width, height, background, nodes: Vec::new() }
    }

    /// Drop all drawn content and adopt a new surface size.
    pub fn reset(&mut self, width: f64, height: f64, background: Rgba) {
        self.width = width;
        self.height = height;
        self.background = background;
        self.nodes.clear();
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level node by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == Some(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == Some(id))
    }

    /// All nodes with `class`, depth-first in draw order.
    pub fn by_class(&self, class: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        for n in &self.nodes {
            n.walk(&mut |node| {
                if node.has_class(class) {
                    out.push(node);
                }
            });
        }
        out
    }

    /// Drawn marks, one per record, in dataset order.
    pub fn marks(&self) -> Vec<&Node> {
        self.by_class(crate::chart::MARK_CLASS)
    }
}
