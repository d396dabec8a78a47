// File: crates/benchplot-core/src/svg.rs
// Summary: Vector backend: serializes a Scene into a standalone SVG document.

use std::fmt::Write as _;

use crate::path::fmt_coord as n;
use crate::scene::{Layer, Node, Scene, Stroke, TextAnchor};
use crate::theme::{ColorToken, Theme};

/// Serialize `scene` as SVG.
pub fn render(scene: &Scene) -> String {
    let theme = &scene.theme;
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="system-ui, sans-serif" data-theme="{name}">"#,
        w = scene.width,
        h = scene.height,
        name = theme.name,
    );

    let clipped = scene.layers.iter().filter(|l| l.clip.is_some()).collect::<Vec<_>>();
    if !clipped.is_empty() {
        out.push_str("<defs>\n");
        for layer in clipped {
            if let Some(c) = layer.clip {
                let _ = writeln!(
                    out,
                    r#"<clipPath id="clip-{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    layer.kind.name(),
                    n(c.left),
                    n(c.top),
                    n(c.width()),
                    n(c.height()),
                );
            }
        }
        out.push_str("</defs>\n");
    }

    let _ = writeln!(out, r#"<rect width="100%" height="100%"{}/>"#, fill_attr(theme, Some(scene.background)));
    for layer in &scene.layers {
        write_layer(&mut out, theme, layer);
    }
    out.push_str("</svg>\n");
    out
}

fn write_layer(out: &mut String, theme: &Theme, layer: &Layer) {
    let name = layer.kind.name();
    if layer.clip.is_some() {
        let _ = writeln!(out, r#"<g id="{name}" clip-path="url(#clip-{name})">"#);
    } else {
        let _ = writeln!(out, r#"<g id="{name}">"#);
    }
    for node in &layer.nodes {
        write_node(out, theme, node);
    }
    out.push_str("</g>\n");
}

fn write_node(out: &mut String, theme: &Theme, node: &Node) {
    match node {
        Node::Rect { rect, fill, stroke, corner_radius } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                n(rect.left),
                n(rect.top),
                n(rect.width()),
                n(rect.height()),
            );
            if *corner_radius > 0.0 {
                let _ = write!(out, r#" rx="{}""#, n(*corner_radius));
            }
            let _ = writeln!(out, "{}{}/>", fill_attr(theme, *fill), stroke_attrs(theme, stroke.as_ref()));
        }
        Node::Line { from, to, stroke } => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                n(from.x),
                n(from.y),
                n(to.x),
                n(to.y),
                stroke_attrs(theme, Some(stroke)),
            );
        }
        Node::Path { path, stroke } => {
            let _ = writeln!(
                out,
                r#"<path d="{}" fill="none" stroke-linejoin="round"{}/>"#,
                path.to_svg_d(),
                stroke_attrs(theme, Some(stroke)),
            );
        }
        Node::Circle { center, radius, fill, stroke } => {
            let _ = writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
                n(center.x),
                n(center.y),
                n(*radius),
                fill_attr(theme, *fill),
                stroke_attrs(theme, stroke.as_ref()),
            );
        }
        Node::Text(t) => {
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{}"#,
                n(t.pos.x),
                n(t.pos.y),
                n(t.size),
                fill_attr(theme, Some(t.color)),
            );
            if t.rotation != 0.0 {
                let _ = write!(out, r#" transform="rotate({} {} {})""#, n(t.rotation), n(t.pos.x), n(t.pos.y));
            }
            if t.monospace {
                out.push_str(r#" font-family="monospace""#);
            }
            if t.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            let _ = writeln!(out, ">{}</text>", escape(&t.text));
        }
    }
}

fn fill_attr(theme: &Theme, fill: Option<ColorToken>) -> String {
    match fill {
        None => r#" fill="none""#.to_string(),
        Some(token) => {
            let c = theme.resolve(token);
            let mut s = format!(r#" fill="{}""#, c.to_hex());
            if c.a < 255 {
                let _ = write!(s, r#" fill-opacity="{:.3}""#, c.opacity());
            }
            s
        }
    }
}

fn stroke_attrs(theme: &Theme, stroke: Option<&Stroke>) -> String {
    let Some(stroke) = stroke else { return String::new() };
    let c = theme.resolve(stroke.color);
    let mut s = format!(r#" stroke="{}" stroke-width="{}""#, c.to_hex(), n(stroke.width));
    if c.a < 255 {
        let _ = write!(s, r#" stroke-opacity="{:.3}""#, c.opacity());
    }
    if let Some([on, off]) = stroke.dash {
        let _ = write!(s, r#" stroke-dasharray="{} {}""#, n(on), n(off));
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
