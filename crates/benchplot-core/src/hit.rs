// File: crates/benchplot-core/src/hit.rs
// Summary: Nearest-point hit testing and the single ActivePoint slot driven by pointer events.

use tracing::{debug, trace};

use crate::geometry::PixelPoint;
use crate::scale::Projection;
use crate::series::{Point, Series};

/// Pointer input in the plot's own coordinate frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
}

/// The point currently highlighted because of pointer proximity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivePoint {
    pub series_index: usize,
    pub point_index: usize,
    pub domain: Point,
    /// Plot-local pixel position.
    pub pixel: PixelPoint,
}

/// Result of a successful nearest-point query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: ActivePoint,
    pub distance: f64,
}

struct Target {
    series_index: usize,
    point_index: usize,
    domain: Point,
    pixel: PixelPoint,
}

/// Holds every rendered point in pixel space, in series then point order.
pub struct HitTester {
    targets: Vec<Target>,
    threshold: f64,
}

impl HitTester {
    pub fn new(series: &[Series], projection: &Projection, threshold: f64) -> Self {
        let targets = series
            .iter()
            .enumerate()
            .flat_map(|(si, s)| {
                s.points.iter().enumerate().map(move |(pi, &p)| Target {
                    series_index: si,
                    point_index: pi,
                    domain: p,
                    pixel: projection.to_pixel(p),
                })
            })
            .collect();
        Self { targets, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Globally nearest point to `pointer`, if closer than the threshold.
    /// Ties go to the first point scanned.
    pub fn nearest(&self, pointer: PixelPoint) -> Option<Hit> {
        let mut best: Option<(&Target, f64)> = None;
        for t in &self.targets {
            let d = t.pixel.distance(pointer);
            if best.map_or(true, |(_, min)| d < min) {
                best = Some((t, d));
            }
        }
        let (t, distance) = best?;
        (distance < self.threshold).then(|| Hit {
            point: ActivePoint {
                series_index: t.series_index,
                point_index: t.point_index,
                domain: t.domain,
                pixel: t.pixel,
            },
            distance,
        })
    }
}

/// Mutable hover state of one chart: the ActivePoint slot and the last
/// pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverState {
    active: Option<ActivePoint>,
    pointer: Option<PixelPoint>,
}

impl HoverState {
    pub fn active(&self) -> Option<&ActivePoint> {
        self.active.as_ref()
    }

    pub fn pointer(&self) -> Option<PixelPoint> {
        self.pointer
    }

    /// Apply one pointer event; returns true when anything visible changed.
    ///
    /// A move with no point in range leaves the current ActivePoint alone;
    /// only `Leave` clears it.
    pub fn handle(&mut self, tester: &HitTester, event: PointerEvent) -> bool {
        trace!(?event, "pointer event");
        match event {
            PointerEvent::Move { x, y } => {
                let pointer = PixelPoint::new(x, y);
                let mut changed = self.pointer != Some(pointer);
                self.pointer = Some(pointer);
                if let Some(hit) = tester.nearest(pointer) {
                    if self.active != Some(hit.point) {
                        debug!(
                            series = hit.point.series_index,
                            point = hit.point.point_index,
                            distance = hit.distance,
                            "active point changed"
                        );
                        self.active = Some(hit.point);
                        changed = true;
                    }
                }
                changed
            }
            PointerEvent::Leave => {
                let changed = self.active.is_some() || self.pointer.is_some();
                if self.active.is_some() {
                    debug!("active point cleared");
                }
                self.active = None;
                self.pointer = None;
                changed
            }
        }
    }
}
