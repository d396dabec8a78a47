// File: crates/benchplot-core/src/error.rs
// Summary: Configuration errors surfaced when a chart or its series are constructed.

use std::fmt;

use thiserror::Error;

/// Which axis a domain bound belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::X => f.write_str("x"),
            AxisKind::Y => f.write_str("y"),
        }
    }
}

/// Errors that reject a chart before anything is drawn.
///
/// Bad data points are never reported here; the adapter drops them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("series #{index} ({display_name:?}) has neither a key nor a filter")]
    MissingSelector { index: usize, display_name: String },

    #[error("chart needs at least one series")]
    NoSeries,

    #[error("domain max for the {axis} axis must be finite and non-negative, got {value}")]
    InvalidDomain { axis: AxisKind, value: f64 },

    #[error("padding factor for the {axis} axis must be finite and positive, got {value}")]
    InvalidPad { axis: AxisKind, value: f64 },

    #[error("surface {width}x{height} leaves no room for the plot area")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, ChartError>;
