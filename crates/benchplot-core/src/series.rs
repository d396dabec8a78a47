// File: crates/benchplot-core/src/series.rs
// Summary: Series model for benchmark lines plus the chart's display metadata.

use serde::Deserialize;

/// One observation in domain units (input size, metric value).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A named line of benchmark observations for one algorithm/configuration.
///
/// `points` are kept sorted ascending by `x`; ties keep their ingestion order.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub id: String,
    pub display_name: String,
    pub style_class: String,
    pub points: Vec<Point>,
}

impl Series {
    /// Build a series from raw points. Non-finite points are dropped and the
    /// rest are stably sorted by `x`.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, points: Vec<Point>) -> Self {
        let mut points: Vec<Point> = points.into_iter().filter(Point::is_finite).collect();
        sort_by_x(&mut points);
        Self { id: id.into(), display_name: display_name.into(), style_class: String::new(), points }
    }

    pub fn with_style_class(mut self, class: impl Into<String>) -> Self {
        self.style_class = class.into();
        self
    }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }
}

/// Stable ascending sort by `x`.
pub fn sort_by_x(points: &mut [Point]) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
}

/// Axis titles and caption; display-only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartMetadata {
    pub x_axis_name: String,
    pub y_axis_name: String,
    pub caption: String,
}

impl ChartMetadata {
    pub fn new(x_axis_name: impl Into<String>, y_axis_name: impl Into<String>, caption: impl Into<String>) -> Self {
        Self { x_axis_name: x_axis_name.into(), y_axis_name: y_axis_name.into(), caption: caption.into() }
    }
}
