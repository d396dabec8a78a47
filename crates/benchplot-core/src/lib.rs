// File: crates/benchplot-core/src/lib.rs
// Summary: Core library entry point; exports the benchmark chart engine's public API.

pub mod adapter;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod path;
pub mod raster;
pub mod scale;
pub mod scene;
pub mod series;
pub mod svg;
pub mod text;
pub mod theme;
pub mod types;

pub use adapter::{BenchRow, BenchmarkName, Cell, DataAdapter, SeriesSpec};
pub use chart::{Chart, ChartConfig, ChartHandle, RenderOptions, RenderOutput, RendererMode};
pub use error::{AxisKind, ChartError};
pub use geometry::{PixelPoint, Rect};
pub use hit::{ActivePoint, Hit, HitTester, HoverState, PointerEvent};
pub use path::{LinePath, PathCommand};
pub use scale::{LinearScale, Projection, Tick};
pub use scene::{Layer, LayerKind, Node, Scene};
pub use series::{ChartMetadata, Point, Series};
pub use text::TextShaper;
pub use theme::{ColorToken, Rgba, Subscription, Theme, ThemeSource};
pub use types::{Dimensions, DomainMax, Insets};
