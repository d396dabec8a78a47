// File: crates/benchplot-core/src/chart.rs
// Summary: Chart construction, scene composition, pointer handling and output dispatch.

use std::cell::{Cell, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AxisKind, ChartError};
use crate::geometry::{clamp, PixelPoint, Rect};
use crate::hit::{ActivePoint, HitTester, HoverState, PointerEvent};
use crate::path::LinePath;
use crate::scale::{group_thousands, Projection, Tick};
use crate::scene::{Layer, LayerKind, Node, Scene, Stroke, TextAnchor, TextNode};
use crate::series::{ChartMetadata, Point, Series};
use crate::theme::{self, ColorToken, Subscription, Theme, ThemeSource};
use crate::types::{
    Dimensions, DomainMax, Insets, HIT_THRESHOLD_PX, TICK_SPACING_X, TICK_SPACING_Y, X_PAD, Y_PAD,
};
use crate::{raster, svg};

/// Drawing backend; geometry is identical for both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererMode {
    /// Skia CPU raster surface, PNG output.
    #[default]
    Raster,
    /// SVG document.
    Vector,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub insets: Insets,
    pub x_pad: f64,
    pub y_pad: f64,
    pub tick_spacing_x: f64,
    pub tick_spacing_y: f64,
    pub hit_threshold_px: f64,
    pub line_width: f64,
    pub marker_radius: f64,
    pub highlight_radius: f64,
    /// Tooltip top-left offset from the active point.
    pub tooltip_offset: (f64, f64),
    pub crosshair: bool,
    /// Text nodes (labels, legend names, tooltip text, caption). Off for
    /// font-independent snapshots.
    pub draw_labels: bool,
    /// Initial palette name.
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            insets: Insets::default(),
            x_pad: X_PAD,
            y_pad: Y_PAD,
            tick_spacing_x: TICK_SPACING_X,
            tick_spacing_y: TICK_SPACING_Y,
            hit_threshold_px: HIT_THRESHOLD_PX,
            line_width: 2.0,
            marker_radius: 3.0,
            highlight_radius: 6.0,
            tooltip_offset: (20.0, -80.0),
            crosshair: true,
            draw_labels: true,
            theme: "light".to_string(),
        }
    }
}

/// Everything a chart needs; immutable once the chart is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub dimensions: Dimensions,
    pub domain_max: DomainMax,
    pub series: Vec<Series>,
    pub metadata: ChartMetadata,
    pub renderer_mode: RendererMode,
    pub options: RenderOptions,
}

impl ChartConfig {
    pub fn new(dimensions: Dimensions, domain_max: DomainMax, series: Vec<Series>, metadata: ChartMetadata) -> Self {
        Self {
            dimensions,
            domain_max,
            series,
            metadata,
            renderer_mode: RendererMode::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_renderer_mode(mut self, mode: RendererMode) -> Self {
        self.renderer_mode = mode;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// Rendered bytes in the configured mode.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutput {
    Png(Vec<u8>),
    Svg(String),
}

impl RenderOutput {
    pub fn extension(&self) -> &'static str {
        match self {
            RenderOutput::Png(_) => "png",
            RenderOutput::Svg(_) => "svg",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RenderOutput::Png(b) => b,
            RenderOutput::Svg(s) => s.as_bytes(),
        }
    }
}

pub struct Chart {
    config: ChartConfig,
    plot: Rect,
    projection: Projection,
    /// Plot-local paths, one per series.
    paths: Vec<LinePath>,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    hit: HitTester,
    hover: HoverState,
    theme: Theme,
}

impl Chart {
    /// Validate `config` and lay the chart out.
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        if config.series.is_empty() {
            return Err(ChartError::NoSeries);
        }
        let opts = &config.options;
        let x_domain = padded_domain(AxisKind::X, config.domain_max.x, opts.x_pad)?;
        let y_domain = padded_domain(AxisKind::Y, config.domain_max.y, opts.y_pad)?;

        let Dimensions { width, height } = config.dimensions;
        let insets = config.options.insets;
        let plot_w = i64::from(width) - i64::from(insets.hsum());
        let plot_h = i64::from(height) - i64::from(insets.vsum());
        if plot_w <= 0 || plot_h <= 0 {
            return Err(ChartError::InvalidDimensions { width, height });
        }
        let plot = Rect::from_ltwh(f64::from(insets.left), f64::from(insets.top), plot_w as f64, plot_h as f64);

        let projection = Projection::new(x_domain, y_domain, plot.width(), plot.height());
        let paths = config
            .series
            .iter()
            .map(|s| LinePath::build(&projection.project(&s.points)))
            .collect::<Vec<_>>();
        let x_ticks = projection.x.ticks(opts.tick_spacing_x);
        let y_ticks = projection.y.ticks(opts.tick_spacing_y);
        let hit = HitTester::new(&config.series, &projection, opts.hit_threshold_px);
        let theme = themed(theme::find(&opts.theme), &config.series);

        debug!(
            series = config.series.len(),
            points = hit.len(),
            x_ticks = x_ticks.len(),
            y_ticks = y_ticks.len(),
            mode = ?config.renderer_mode,
            "chart built"
        );

        Ok(Self { config, plot, projection, paths, x_ticks, y_ticks, hit, hover: HoverState::default(), theme })
    }

    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn series(&self) -> &[Series] { &self.config.series }
    pub fn metadata(&self) -> &ChartMetadata { &self.config.metadata }
    /// Data area in surface coordinates.
    pub fn plot_rect(&self) -> Rect { self.plot }
    pub fn projection(&self) -> &Projection { &self.projection }
    pub fn paths(&self) -> &[LinePath] { &self.paths }
    pub fn x_ticks(&self) -> &[Tick] { &self.x_ticks }
    pub fn y_ticks(&self) -> &[Tick] { &self.y_ticks }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn active_point(&self) -> Option<&ActivePoint> { self.hover.active() }

    /// Replace the palette; geometry and hover state are kept.
    pub fn set_theme(&mut self, theme: Theme) {
        debug!(theme = theme.name, "applying theme");
        self.theme = themed(theme, &self.config.series);
    }

    /// Pointer event in plot-local coordinates.
    pub fn pointer_event(&mut self, event: PointerEvent) -> bool {
        self.hover.handle(&self.hit, event)
    }

    /// Pointer moved to a surface position. Leaving the data area counts
    /// as a pointer-leave.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        let p = PixelPoint::new(x, y);
        if !self.plot.contains(p) {
            return self.pointer_left();
        }
        let local = self.plot.to_local(p);
        self.pointer_event(PointerEvent::Move { x: local.x, y: local.y })
    }

    pub fn pointer_left(&mut self) -> bool {
        self.pointer_event(PointerEvent::Leave)
    }

    /// Domain value under the last pointer position, if the pointer is over the plot.
    pub fn pointer_domain(&self) -> Option<Point> {
        self.hover.pointer().map(|p| self.projection.to_domain(p))
    }

    // ---- scene -------------------------------------------------------------

    /// Compose the current frame.
    pub fn scene(&self) -> Scene {
        let labels = self.config.options.draw_labels;
        let mut layers = vec![self.frame_layer(), self.grid_layer()];
        if labels {
            layers.push(self.axes_layer());
        }
        layers.push(self.series_layer());
        if self.config.options.crosshair {
            layers.push(self.crosshair_layer());
        }
        layers.push(self.legend_layer());
        if let Some(active) = self.hover.active() {
            layers.push(self.highlight_layer(active));
            layers.push(self.tooltip_layer(active));
        }
        if labels && !self.config.metadata.caption.is_empty() {
            layers.push(self.caption_layer());
        }
        Scene {
            width: self.config.dimensions.width,
            height: self.config.dimensions.height,
            background: ColorToken::Background,
            layers,
            theme: self.theme.clone(),
        }
    }

    fn to_surface(&self, p: PixelPoint) -> PixelPoint {
        self.plot.to_surface(p)
    }

    fn frame_layer(&self) -> Layer {
        let mut layer = Layer::new(LayerKind::Frame);
        layer.push(Node::Rect {
            rect: self.plot,
            fill: Some(ColorToken::Surface),
            stroke: Some(Stroke::solid(ColorToken::AxisLine, 1.0)),
            corner_radius: 0.0,
        });
        layer
    }

    fn grid_layer(&self) -> Layer {
        let p = self.plot;
        let grid = Stroke::solid(ColorToken::Grid, 0.5);
        let mut layer = Layer::clipped(LayerKind::Grid, p);
        for t in &self.x_ticks {
            let x = p.left + t.px;
            layer.push(Node::Line { from: PixelPoint::new(x, p.top), to: PixelPoint::new(x, p.bottom), stroke: grid });
        }
        for t in &self.y_ticks {
            let y = p.bottom - t.px;
            layer.push(Node::Line { from: PixelPoint::new(p.left, y), to: PixelPoint::new(p.right, y), stroke: grid });
        }
        layer
    }

    fn axes_layer(&self) -> Layer {
        let p = self.plot;
        let meta = &self.config.metadata;
        let mut layer = Layer::new(LayerKind::Axes);
        for t in &self.x_ticks {
            let pos = PixelPoint::new(p.left + t.px, p.bottom + 18.0);
            layer.push(Node::Text(
                TextNode::new(pos, t.label.clone(), 11.0, ColorToken::MutedText).anchored(TextAnchor::Middle),
            ));
        }
        for t in &self.y_ticks {
            let pos = PixelPoint::new(p.left - 8.0, p.bottom - t.px + 4.0);
            layer.push(Node::Text(
                TextNode::new(pos, t.label.clone(), 11.0, ColorToken::MutedText).anchored(TextAnchor::End),
            ));
        }
        if !meta.x_axis_name.is_empty() {
            let pos = PixelPoint::new(p.left + p.width() / 2.0, p.bottom + 40.0);
            layer.push(Node::Text(
                TextNode::new(pos, meta.x_axis_name.to_uppercase(), 12.0, ColorToken::MutedText)
                    .anchored(TextAnchor::Middle),
            ));
        }
        if !meta.y_axis_name.is_empty() {
            let left = f64::from(self.config.options.insets.left);
            let pos = PixelPoint::new(p.left - left + 16.0, p.top + p.height() / 2.0);
            layer.push(Node::Text(
                TextNode::new(pos, meta.y_axis_name.to_uppercase(), 12.0, ColorToken::MutedText)
                    .anchored(TextAnchor::Middle)
                    .rotated(-90.0),
            ));
        }
        layer
    }

    fn series_layer(&self) -> Layer {
        let opts = &self.config.options;
        let (dx, dy) = (self.plot.left, self.plot.top);
        let mut layer = Layer::clipped(LayerKind::Series, self.plot);
        for (i, path) in self.paths.iter().enumerate() {
            if path.is_empty() {
                continue;
            }
            let surface_path = path.translated(dx, dy);
            let markers = surface_path.vertices().collect::<Vec<_>>();
            layer.push(Node::Path { path: surface_path, stroke: Stroke::solid(ColorToken::Series(i), opts.line_width) });
            for center in markers {
                layer.push(Node::Circle { center, radius: opts.marker_radius, fill: Some(ColorToken::Marker), stroke: None });
            }
        }
        layer
    }

    fn crosshair_layer(&self) -> Layer {
        let p = self.plot;
        let mut layer = Layer::clipped(LayerKind::Crosshair, p);
        let target = self.hover.active().map(|a| a.pixel).or_else(|| self.hover.pointer());
        if let Some(local) = target {
            let c = self.to_surface(local);
            let stroke = Stroke::dashed(ColorToken::Crosshair, 1.0, 4.0, 4.0);
            layer.push(Node::Line { from: PixelPoint::new(c.x, p.top), to: PixelPoint::new(c.x, p.bottom), stroke });
            layer.push(Node::Line { from: PixelPoint::new(p.left, c.y), to: PixelPoint::new(p.right, c.y), stroke });
        }
        layer
    }

    fn legend_layer(&self) -> Layer {
        const SWATCH_W: f64 = 12.0;
        const SWATCH_GAP: f64 = 6.0;
        const ENTRY_GAP: f64 = 16.0;
        const SIZE: f64 = 12.0;

        let labels = self.config.options.draw_labels;
        let entry_width = |s: &Series| {
            let text = if labels { estimate_text_width(&s.display_name, SIZE) + SWATCH_GAP } else { 0.0 };
            SWATCH_W + text
        };
        let series = &self.config.series;
        let total: f64 = series.iter().map(|s| entry_width(s)).sum::<f64>() + ENTRY_GAP * series.len().saturating_sub(1) as f64;

        let mut layer = Layer::new(LayerKind::Legend);
        let baseline = self.plot.top - 14.0;
        let mut x = self.plot.right - total;
        for (i, s) in series.iter().enumerate() {
            layer.push(Node::Rect {
                rect: Rect::from_ltwh(x, baseline - 5.0, SWATCH_W, 2.0),
                fill: Some(ColorToken::Series(i)),
                stroke: None,
                corner_radius: 0.0,
            });
            if labels {
                let pos = PixelPoint::new(x + SWATCH_W + SWATCH_GAP, baseline);
                layer.push(Node::Text(TextNode::new(pos, s.display_name.clone(), SIZE, ColorToken::MutedText)));
            }
            x += entry_width(s) + ENTRY_GAP;
        }
        layer
    }

    fn highlight_layer(&self, active: &ActivePoint) -> Layer {
        let mut layer = Layer::new(LayerKind::Highlight);
        layer.push(Node::Circle {
            center: self.to_surface(active.pixel),
            radius: self.config.options.highlight_radius,
            fill: None,
            stroke: Some(Stroke::solid(ColorToken::HoverAccent, 2.0)),
        });
        layer
    }

    fn tooltip_layer(&self, active: &ActivePoint) -> Layer {
        const PAD_X: f64 = 14.0;
        const PAD_Y: f64 = 10.0;
        const LINE_H: f64 = 18.0;
        const BODY: f64 = 12.0;
        const HEADER: f64 = 10.0;

        let meta = &self.config.metadata;
        let header = self
            .config
            .series
            .get(active.series_index)
            .map(|s| s.display_name.to_uppercase())
            .unwrap_or_default();
        let rows = [
            (label_or(&meta.y_axis_name, "y"), format_readout(active.domain.y), ColorToken::Accent),
            (label_or(&meta.x_axis_name, "x"), format_readout(active.domain.x), ColorToken::Text),
        ];

        let row_width = rows
            .iter()
            .map(|(k, v, _)| estimate_text_width(k, BODY) + 20.0 + estimate_text_width(v, BODY))
            .fold(estimate_text_width(&header, HEADER), f64::max);
        let box_w = row_width + 2.0 * PAD_X;
        let box_h = 2.0 * PAD_Y + LINE_H * (rows.len() + 1) as f64;

        let (ox, oy) = self.config.options.tooltip_offset;
        let anchor = self.to_surface(active.pixel).offset(ox, oy);
        let (w, h) = (f64::from(self.config.dimensions.width), f64::from(self.config.dimensions.height));
        let left = clamp(anchor.x, 0.0, (w - box_w).max(0.0));
        let top = clamp(anchor.y, 0.0, (h - box_h).max(0.0));
        let rect = Rect::from_ltwh(left, top, box_w, box_h);

        let mut layer = Layer::new(LayerKind::Tooltip);
        layer.push(Node::Rect {
            rect,
            fill: Some(ColorToken::TooltipBackground),
            stroke: Some(Stroke::solid(ColorToken::TooltipBorder, 1.0)),
            corner_radius: 8.0,
        });
        if !self.config.options.draw_labels {
            return layer;
        }
        let mut baseline = top + PAD_Y + LINE_H - 5.0;
        layer.push(Node::Text(TextNode::new(
            PixelPoint::new(left + PAD_X, baseline),
            header,
            HEADER,
            ColorToken::MutedText,
        )));
        for (key, value, color) in rows {
            baseline += LINE_H;
            layer.push(Node::Text(TextNode::new(PixelPoint::new(left + PAD_X, baseline), format!("{key}:"), BODY, ColorToken::Text)));
            layer.push(Node::Text(
                TextNode::new(PixelPoint::new(rect.right - PAD_X, baseline), value, BODY, color)
                    .anchored(TextAnchor::End)
                    .mono()
                    .bold(),
            ));
        }
        layer
    }

    fn caption_layer(&self) -> Layer {
        let mut layer = Layer::new(LayerKind::Caption);
        let (w, h) = (f64::from(self.config.dimensions.width), f64::from(self.config.dimensions.height));
        layer.push(Node::Text(
            TextNode::new(PixelPoint::new(w / 2.0, h - 10.0), self.config.metadata.caption.clone(), 12.0, ColorToken::MutedText)
                .anchored(TextAnchor::Middle),
        ));
        layer
    }

    // ---- output ------------------------------------------------------------

    /// Render in the configured mode.
    pub fn render(&self) -> Result<RenderOutput> {
        match self.config.renderer_mode {
            RendererMode::Raster => self.render_to_png_bytes().map(RenderOutput::Png),
            RendererMode::Vector => Ok(RenderOutput::Svg(self.render_to_svg_string())),
        }
    }

    /// Render in the configured mode and write the result to `path`.
    pub fn render_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let out = self.render()?;
        write_file(path.as_ref(), out.as_bytes())
    }

    /// RGBA8 pixels as `(pixels, width, height, row_stride)`.
    pub fn render_to_rgba8(&self) -> Result<(Vec<u8>, u32, u32, usize)> {
        raster::render_rgba8(&self.scene())
    }

    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        raster::render_png(&self.scene())
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, output_png_path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes()?;
        write_file(output_png_path.as_ref(), &bytes)
    }

    pub fn render_to_svg_string(&self) -> String {
        svg::render(&self.scene())
    }

    pub fn render_to_svg(&self, output_svg_path: impl AsRef<Path>) -> Result<()> {
        write_file(output_svg_path.as_ref(), self.render_to_svg_string().as_bytes())
    }
}

/// Scale ceiling for one axis: the configured max times its padding factor.
/// A ceiling that only overflows once padded is reported as given.
fn padded_domain(axis: AxisKind, value: f64, pad: f64) -> Result<f64, ChartError> {
    if !(pad.is_finite() && pad > 0.0) {
        return Err(ChartError::InvalidPad { axis, value: pad });
    }
    let padded = value * pad;
    if value.is_finite() && value >= 0.0 && padded.is_finite() {
        Ok(padded)
    } else {
        Err(ChartError::InvalidDomain { axis, value })
    }
}

fn themed(theme: Theme, series: &[Series]) -> Theme {
    theme.with_style_classes(series.iter().map(|s| s.style_class.as_str()))
}

fn label_or<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    if name.is_empty() { fallback } else { name }
}

/// Tooltip number: whole numbers grouped (`12,345`), others up to 3 decimals.
pub fn format_readout(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return group_thousands(v);
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Rough advance width for laying out boxes before a backend measures text.
pub fn estimate_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---- live handle ------------------------------------------------------------

/// Shared owner of a chart that follows a [`ThemeSource`].
///
/// Dropping the handle drops the theme subscription with it. A theme change
/// that arrives while the chart is borrowed (e.g. from inside [`ChartHandle::with`])
/// is held back and applied on the next access.
pub struct ChartHandle {
    chart: Rc<RefCell<Chart>>,
    deferred_theme: Rc<Cell<Option<Theme>>>,
    subscription: Option<Subscription>,
}

impl ChartHandle {
    pub fn new(chart: Chart) -> Self {
        Self { chart: Rc::new(RefCell::new(chart)), deferred_theme: Rc::default(), subscription: None }
    }

    /// Apply the source's current theme now and on every later change.
    /// Replaces any previous subscription.
    pub fn attach_theme(&mut self, source: &ThemeSource) {
        self.chart_mut().set_theme(source.theme());
        let weak = Rc::downgrade(&self.chart);
        let deferred = self.deferred_theme.clone();
        self.subscription = Some(source.subscribe(move |name| {
            let Some(chart) = weak.upgrade() else { return };
            let theme = theme::find(name);
            match chart.try_borrow_mut() {
                Ok(mut chart) => {
                    deferred.take();
                    chart.set_theme(theme);
                }
                Err(_) => {
                    debug!(theme = theme.name, "chart busy, theme deferred");
                    deferred.set(Some(theme));
                }
            }
        }));
    }

    pub fn detach_theme(&mut self) {
        self.subscription = None;
    }

    pub fn is_theme_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn pointer_moved(&self, x: f64, y: f64) -> bool {
        self.chart_mut().pointer_moved(x, y)
    }

    pub fn pointer_left(&self) -> bool {
        self.chart_mut().pointer_left()
    }

    pub fn scene(&self) -> Scene {
        self.sync_theme();
        self.chart.borrow().scene()
    }

    pub fn active_point(&self) -> Option<ActivePoint> {
        self.chart.borrow().active_point().copied()
    }

    /// Run `f` with shared access to the chart.
    pub fn with<R>(&self, f: impl FnOnce(&Chart) -> R) -> R {
        self.sync_theme();
        f(&self.chart.borrow())
    }

    fn chart_mut(&self) -> RefMut<'_, Chart> {
        let mut chart = self.chart.borrow_mut();
        if let Some(theme) = self.deferred_theme.take() {
            chart.set_theme(theme);
        }
        chart
    }

    /// Apply a deferred theme unless the chart is still borrowed.
    fn sync_theme(&self) {
        if let Some(theme) = self.deferred_theme.take() {
            match self.chart.try_borrow_mut() {
                Ok(mut chart) => chart.set_theme(theme),
                Err(_) => self.deferred_theme.set(Some(theme)),
            }
        }
    }
}
