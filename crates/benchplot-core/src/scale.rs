// File: crates/benchplot-core/src/scale.rs
// Summary: Linear domain-to-pixel scales, nice tick generation and the plot projection.

use crate::geometry::PixelPoint;
use crate::series::Point;

/// Linear map from `[0, domain_max]` onto `[pixel_min, pixel_max]`.
///
/// A zero `domain_max` collapses every value onto `pixel_min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain_max: f64,
    pub pixel_min: f64,
    pub pixel_max: f64,
}

impl LinearScale {
    pub fn new(domain_max: f64, pixel_min: f64, pixel_max: f64) -> Self {
        Self { domain_max, pixel_min, pixel_max }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.domain_max == 0.0
    }

    #[inline]
    pub fn span_px(&self) -> f64 {
        self.pixel_max - self.pixel_min
    }

    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        if self.is_degenerate() {
            return self.pixel_min;
        }
        self.pixel_min + (v / self.domain_max) * self.span_px()
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let span = self.span_px();
        if self.is_degenerate() || span == 0.0 {
            return 0.0;
        }
        (px - self.pixel_min) / span * self.domain_max
    }

    /// Ticks at nice round values over `[0, domain_max]`, roughly
    /// `desired_spacing_px` apart.
    pub fn ticks(&self, desired_spacing_px: f64) -> Vec<Tick> {
        if self.is_degenerate() || !(self.domain_max.is_finite() && self.domain_max > 0.0) {
            return vec![Tick::new(0.0, self.pixel_min, 1.0)];
        }
        let count = tick_count(self.span_px().abs(), desired_spacing_px);
        let step = nice_step(self.domain_max / count as f64);
        // index of the last tick; the epsilon keeps e.g. 0.3 / 0.1 from losing its top tick
        let last = (self.domain_max / step + 1e-9).floor();
        if !last.is_finite() {
            return vec![Tick::new(0.0, self.pixel_min, step)];
        }
        let last = (last as usize).min(count.saturating_mul(10));
        (0..=last)
            .map(|i| {
                let value = step * i as f64;
                Tick::new(value, self.apply(value), step)
            })
            .collect()
    }
}

/// `max(2, floor(span / spacing))`.
pub fn tick_count(span_px: f64, desired_spacing_px: f64) -> usize {
    if desired_spacing_px <= 0.0 || !span_px.is_finite() {
        return 2;
    }
    ((span_px / desired_spacing_px).floor() as usize).max(2)
}

/// Smallest value of the form {1, 2, 5} x 10^k that is >= `raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// A labeled gridline position.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub px: f64,
    pub label: String,
}

impl Tick {
    fn new(value: f64, px: f64, step: f64) -> Self {
        Self { value, px, label: format_value(value, step) }
    }
}

/// Format `value` with as many decimals as `step` needs; whole-number steps
/// get thousands separators.
pub fn format_value(value: f64, step: f64) -> String {
    let decimals = decimals_for_step(step);
    if decimals == 0 {
        group_thousands(value.round())
    } else {
        format!("{value:.decimals$}")
    }
}

fn decimals_for_step(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) || step.fract() == 0.0 {
        return 0;
    }
    let d = (-step.log10().floor()) as i32;
    d.clamp(0, 12) as usize
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(v: f64) -> String {
    let neg = v < 0.0;
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if neg && out != "0" {
        out.insert(0, '-');
    }
    out
}

/// Domain to plot-local pixel mapping shared by paths and hit-testing.
///
/// The y axis is flipped: pixel rows grow downward, values grow upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: LinearScale,
    pub y: LinearScale,
    pub plot_height: f64,
}

impl Projection {
    /// Scales for a `plot_width` x `plot_height` area over the padded domain.
    pub fn new(x_domain: f64, y_domain: f64, plot_width: f64, plot_height: f64) -> Self {
        Self {
            x: LinearScale::new(x_domain, 0.0, plot_width),
            y: LinearScale::new(y_domain, 0.0, plot_height),
            plot_height,
        }
    }

    #[inline]
    pub fn to_pixel(&self, p: Point) -> PixelPoint {
        PixelPoint::new(self.x.apply(p.x), self.plot_height - self.y.apply(p.y))
    }

    #[inline]
    pub fn to_domain(&self, px: PixelPoint) -> Point {
        Point::new(self.x.invert(px.x), self.y.invert(self.plot_height - px.y))
    }

    pub fn project(&self, points: &[Point]) -> Vec<PixelPoint> {
        points.iter().map(|p| self.to_pixel(*p)).collect()
    }
}
