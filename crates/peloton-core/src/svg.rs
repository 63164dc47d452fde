// File: crates/peloton-core/src/svg.rs
// Summary: SVG serialization of a Scene; ids, classes and data-* attributes are preserved.

use std::fmt::{self, Write as _};

use crate::error::Result;
use crate::scene::{Anchor, Attrs, Baseline, Node, Rgba, Scene, Shape};

/// Display adapter writing `scene` as a standalone SVG document.
pub struct Svg<'a>(pub &'a Scene);

pub fn to_svg(scene: &Scene) -> String {
    Svg(scene).to_string()
}

pub fn write_svg(scene: &Scene, path: impl AsRef<std::path::Path>) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg(scene))?;
    Ok(())
}

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let (w, h) = (Num(s.width), Num(s.height));
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet">"#
        )?;
        writeln!(f, r#"  <rect width="100%" height="100%"{}/>"#, Fill("fill", s.background))?;
        for n in s.nodes() {
            write_node(f, n, 1)?;
        }
        f.write_str("</svg>\n")
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    let attrs = AttrList(&node.attrs);
    match &node.shape {
        Shape::Rect { x, y, width, height, radius, fill } => writeln!(
            f,
            r#"{pad}<rect{attrs} x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            Num(*x),
            Num(*y),
            Num(*width),
            Num(*height),
            Num(*radius),
            Fill("fill", *fill)
        ),
        Shape::Circle { cx, cy, r, fill } => writeln!(
            f,
            r#"{pad}<circle{attrs} cx="{}" cy="{}" r="{}"{}/>"#,
            Num(*cx),
            Num(*cy),
            Num(*r),
            Fill("fill", *fill)
        ),
        Shape::Line { x1, y1, x2, y2, stroke, width } => writeln!(
            f,
            r#"{pad}<line{attrs} x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}"/>"#,
            Num(*x1),
            Num(*y1),
            Num(*x2),
            Num(*y2),
            Fill("stroke", *stroke),
            Num(*width)
        ),
        Shape::Text { x, y, content, size, fill, anchor, baseline, bold } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let baseline = match baseline {
                Baseline::Alphabetic => "alphabetic",
                Baseline::Middle => "middle",
                Baseline::Hanging => "hanging",
            };
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            writeln!(
                f,
                r#"{pad}<text{attrs} x="{}" y="{}" font-size="{}"{} text-anchor="{anchor}" dominant-baseline="{baseline}"{weight}>{}</text>"#,
                Num(*x),
                Num(*y),
                Num(*size),
                Fill("fill", *fill),
                Escaped(content)
            )
        }
        Shape::Group { dx, dy, opacity, children } => {
            write!(f, r#"{pad}<g{attrs}"#)?;
            if *dx != 0.0 || *dy != 0.0 {
                write!(f, r#" transform="translate({}, {})""#, Num(*dx), Num(*dy))?;
            }
            if *opacity < 1.0 {
                write!(f, r#" opacity="{}""#, Num(*opacity))?;
            }
            if children.is_empty() {
                return f.write_str("/>\n");
            }
            f.write_str(">\n")?;
            for c in children {
                write_node(f, c, depth + 1)?;
            }
            writeln!(f, "{pad}</g>")
        }
    }
}

/// Compact number: integers without a fraction, otherwise up to two decimals.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        if v.fract() == 0.0 && v.abs() < 1e15 {
            return write!(f, "{}", v as i64);
        }
        let mut s = format!("{v:.2}");
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        f.write_str(&s)
    }
}

/// ` name="#rrggbb"` plus `name-opacity` when translucent.
struct Fill(&'static str, Rgba);

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Fill(name, color) = self;
        write!(f, r#" {name}="{}""#, color.to_hex())?;
        if color.a < 255 {
            write!(f, r#" {name}-opacity="{}""#, Num(color.opacity()))?;
        }
        Ok(())
    }
}

struct AttrList<'a>(&'a Attrs);

impl fmt::Display for AttrList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.0.id {
            write!(f, r#" id="{}""#, Escaped(id))?;
        }
        if let Some(class) = &self.0.class {
            write!(f, r#" class="{}""#, Escaped(class))?;
        }
        for (k, v) in &self.0.data {
            write!(f, r#" data-{}="{}""#, Escaped(k), Escaped(v))?;
        }
        Ok(())
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}
