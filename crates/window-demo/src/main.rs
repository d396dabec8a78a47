// File: crates/window-demo/src/main.rs
// Summary: Interactive window: benchmark chart blitted via softbuffer, live hover tooltip, `T` toggles the theme.

use std::num::NonZeroU32;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use benchplot_core::{
    BenchRow, BenchmarkName, Cell, Chart, ChartConfig, ChartHandle, ChartMetadata, DataAdapter, Dimensions, DomainMax,
    Series, SeriesSpec, ThemeSource,
};
use tracing::{debug, error, info};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Args: CSV path, metric column
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "results/cycles.csv".to_string());
    let metric = args.next().unwrap_or_else(|| "cpu_time".to_string());

    let rows = load_rows(Path::new(&path), &metric)?;
    let specs = DataAdapter::keys(&rows).into_iter().map(SeriesSpec::keyed).collect::<Vec<_>>();
    let series = DataAdapter::adapt(&rows, &specs)?;
    let domain_max = data_domain(&series);
    let metadata = ChartMetadata::new("Input Size", metric.clone(), format!("{metric} by input size"));
    info!(rows = rows.len(), series = series.len(), "loaded {}", path);

    let themes = ThemeSource::new("light");
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("benchplot")
        .with_inner_size(winit::dpi::LogicalSize::new(960.0, 600.0))
        .build(&event_loop)
        .context("build window")?;

    // SAFETY: `window` is moved into the event loop closure with the context and surface and outlives both.
    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    // Charts are rebuilt per window size; dropping the old handle releases its theme subscription.
    let source = themes.clone();
    let build = move |size: winit::dpi::PhysicalSize<u32>| -> Option<ChartHandle> {
        let dims = Dimensions::new(size.width.max(1), size.height.max(1));
        let config = ChartConfig::new(dims, domain_max, series.clone(), metadata.clone());
        match Chart::new(config) {
            Ok(chart) => {
                let mut handle = ChartHandle::new(chart);
                handle.attach_theme(&source);
                Some(handle)
            }
            Err(e) => {
                // window too small for the insets
                debug!(error = %e, "chart not built");
                None
            }
        }
    };
    let mut handle = build(window.inner_size());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    handle = build(size);
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    if handle.as_ref().is_some_and(|h| h.pointer_moved(position.x, position.y)) {
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    if handle.as_ref().is_some_and(|h| h.pointer_left()) {
                        window.request_redraw();
                    }
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => match key {
                    VirtualKeyCode::T => {
                        themes.toggle();
                        info!(theme = %themes.current(), "theme toggled");
                        window.request_redraw();
                    }
                    VirtualKeyCode::Escape | VirtualKeyCode::Q => *control_flow = ControlFlow::Exit,
                    _ => {}
                },
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = redraw(&mut surface, handle.as_ref(), window.inner_size()) {
                    error!("redraw failed: {e:#}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}

fn redraw(
    surface: &mut softbuffer::Surface,
    handle: Option<&ChartHandle>,
    size: winit::dpi::PhysicalSize<u32>,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize surface: {e}"))?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame: {e}"))?;

    match handle {
        Some(handle) => {
            // Render to RGBA and pack as 0RGB u32 for softbuffer
            let (rgba, ..) = handle.with(|chart| chart.render_to_rgba8())?;
            for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
                *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
            }
        }
        None => frame.fill(0),
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}

fn load_rows(path: &Path, metric: &str) -> Result<Vec<BenchRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let i_name = headers.iter().position(|h| h == "name").context("no name column")?;
    let i_metric = headers
        .iter()
        .position(|h| *h == metric.to_lowercase())
        .with_context(|| format!("no '{metric}' column"))?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let value = rec.get(i_metric).map_or(Cell::Null, Cell::from);
        if let Some(name) = rec.get(i_name).and_then(BenchmarkName::parse) {
            out.push(name.into_row(value));
        }
    }
    Ok(out)
}

fn data_domain(series: &[Series]) -> DomainMax {
    let (x, y) = series
        .iter()
        .flat_map(|s| &s.points)
        .fold((0.0f64, 0.0f64), |(x, y), p| (x.max(p.x), y.max(p.y)));
    DomainMax::new(x, y)
}
