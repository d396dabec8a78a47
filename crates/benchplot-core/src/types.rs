// File: crates/benchplot-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, interaction tunables).

use serde::Deserialize;

/// Default surface width in pixels.
pub const WIDTH: u32 = 760;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 480;

/// Multiplicative pad applied to the x domain ceiling.
pub const X_PAD: f64 = 1.05;
/// Multiplicative pad applied to the y domain ceiling.
pub const Y_PAD: f64 = 1.10;

/// Desired pixel distance between x ticks.
pub const TICK_SPACING_X: f64 = 80.0;
/// Desired pixel distance between y ticks.
pub const TICK_SPACING_Y: f64 = 50.0;

/// Pointer distance (px) under which a data point becomes active.
pub const HIT_THRESHOLD_PX: f64 = 80.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        // bottom leaves room for tick labels, the x title and the caption
        Self::new(72, 24, 40, 72)
    }
}

/// Whole drawing surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Externally supplied scale ceilings shared by every series of a chart.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DomainMax {
    pub x: f64,
    pub y: f64,
}

impl DomainMax {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
