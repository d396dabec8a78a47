// File: crates/benchplot-core/src/scene.rs
// Summary: Backend-agnostic drawable scene: layers of rects, lines, paths, circles and text.

use crate::geometry::{PixelPoint, Rect};
use crate::path::LinePath;
use crate::theme::{ColorToken, Theme};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: ColorToken,
    pub width: f64,
    /// On/off dash lengths; `None` draws a solid line.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub const fn solid(color: ColorToken, width: f64) -> Self {
        Self { color, width, dash: None }
    }
    pub const fn dashed(color: ColorToken, width: f64, on: f64, off: f64) -> Self {
        Self { color, width, dash: Some([on, off]) }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    /// Baseline anchor position.
    pub pos: PixelPoint,
    pub text: String,
    pub size: f64,
    pub color: ColorToken,
    pub anchor: TextAnchor,
    /// Rotation in degrees around `pos`; negative is counter-clockwise.
    pub rotation: f64,
    pub monospace: bool,
    pub bold: bool,
}

impl TextNode {
    pub fn new(pos: PixelPoint, text: impl Into<String>, size: f64, color: ColorToken) -> Self {
        Self {
            pos,
            text: text.into(),
            size,
            color,
            anchor: TextAnchor::Start,
            rotation: 0.0,
            monospace: false,
            bold: false,
        }
    }
    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
    pub fn mono(mut self) -> Self {
        self.monospace = true;
        self
    }
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Rect {
        rect: Rect,
        fill: Option<ColorToken>,
        stroke: Option<Stroke>,
        corner_radius: f64,
    },
    Line {
        from: PixelPoint,
        to: PixelPoint,
        stroke: Stroke,
    },
    Path {
        path: LinePath,
        stroke: Stroke,
    },
    Circle {
        center: PixelPoint,
        radius: f64,
        fill: Option<ColorToken>,
        stroke: Option<Stroke>,
    },
    Text(TextNode),
}

/// What a layer holds; backends use it for grouping and ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Frame,
    Grid,
    Axes,
    Series,
    Crosshair,
    Legend,
    Highlight,
    Tooltip,
    Caption,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Frame => "frame",
            LayerKind::Grid => "grid",
            LayerKind::Axes => "axes",
            LayerKind::Series => "series",
            LayerKind::Crosshair => "crosshair",
            LayerKind::Legend => "legend",
            LayerKind::Highlight => "highlight",
            LayerKind::Tooltip => "tooltip",
            LayerKind::Caption => "caption",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Nodes are clipped to this rect when set.
    pub clip: Option<Rect>,
    pub nodes: Vec<Node>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self { kind, clip: None, nodes: Vec::new() }
    }
    pub fn clipped(kind: LayerKind, clip: Rect) -> Self {
        Self { kind, clip: Some(clip), nodes: Vec::new() }
    }
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }
}

/// A complete frame, ready for a raster or vector backend.
///
/// Geometry is in surface pixels; colours stay symbolic until a backend
/// resolves them through `theme`.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: ColorToken,
    pub layers: Vec<Layer>,
    pub theme: Theme,
}

impl Scene {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn node_count(&self) -> usize {
        self.layers.iter().map(|l| l.nodes.len()).sum()
    }

    /// Same scene with every colour token resolved; used to compare themes.
    pub fn resolved_colors(&self) -> Vec<crate::theme::Rgba> {
        let t = &self.theme;
        let mut out = vec![t.resolve(self.background)];
        for node in self.layers.iter().flat_map(|l| &l.nodes) {
            match node {
                Node::Rect { fill, stroke, .. } | Node::Circle { fill, stroke, .. } => {
                    out.extend(fill.map(|c| t.resolve(c)));
                    out.extend(stroke.map(|s| t.resolve(s.color)));
                }
                Node::Line { stroke, .. } | Node::Path { stroke, .. } => out.push(t.resolve(stroke.color)),
                Node::Text(tn) => out.push(t.resolve(tn.color)),
            }
        }
        out
    }
}
