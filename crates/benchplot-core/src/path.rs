// File: crates/benchplot-core/src/path.rs
// Summary: Polyline path commands for a series already projected into pixel space.

use std::fmt::Write as _;

use crate::geometry::PixelPoint;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
}

/// Straight-segment path visiting points in the order given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinePath {
    pub commands: Vec<PathCommand>,
}

impl LinePath {
    /// One move to the first point, one line per subsequent point.
    pub fn build(points: &[PixelPoint]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(i, &p)| if i == 0 { PathCommand::MoveTo(p) } else { PathCommand::LineTo(p) })
            .collect();
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Vertices in drawing order.
    pub fn vertices(&self) -> impl Iterator<Item = PixelPoint> + '_ {
        self.commands.iter().map(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        })
    }

    /// Same path with every vertex shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|c| match *c {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(p.offset(dx, dy)),
                PathCommand::LineTo(p) => PathCommand::LineTo(p.offset(dx, dy)),
            })
            .collect();
        Self { commands }
    }

    /// SVG path data, e.g. `M 0 10 L 5 20`.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for (i, c) in self.commands.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            let (op, p) = match *c {
                PathCommand::MoveTo(p) => ('M', p),
                PathCommand::LineTo(p) => ('L', p),
            };
            let _ = write!(d, "{op} {} {}", fmt_coord(p.x), fmt_coord(p.y));
        }
        d
    }
}

/// Compact coordinate formatting: two decimals, trailing zeros trimmed.
pub(crate) fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
