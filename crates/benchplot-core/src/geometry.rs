// File: crates/benchplot-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

/// A position in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> PixelPoint {
        PixelPoint::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }

    /// Inclusive containment test.
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Convert a surface position into this rect's own frame.
    pub fn to_local(&self, p: PixelPoint) -> PixelPoint {
        PixelPoint::new(p.x - self.left, p.y - self.top)
    }

    /// Convert a position in this rect's frame back to surface coordinates.
    pub fn to_surface(&self, p: PixelPoint) -> PixelPoint {
        PixelPoint::new(p.x + self.left, p.y + self.top)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
