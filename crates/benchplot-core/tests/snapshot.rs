// File: crates/benchplot-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic charts (labels off) to PNG bytes: idle, hovered, dark.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use benchplot_core::{Chart, ChartConfig, ChartMetadata, Dimensions, DomainMax, Point, RenderOptions, Series};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, bytes: &[u8]) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create snapshots dir");
        }
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn chart(theme: &str) -> Chart {
    let series = vec![
        Series::new("linear", "Linear", vec![Point::new(8.0, 12.0), Point::new(64.0, 40.0), Point::new(512.0, 300.0), Point::new(1024.0, 610.0)]),
        Series::new("binary", "Binary", vec![Point::new(8.0, 10.0), Point::new(64.0, 22.0), Point::new(512.0, 41.0), Point::new(1024.0, 52.0)]),
        Series::new("eytzinger", "Eytzinger", vec![Point::new(8.0, 9.0), Point::new(64.0, 15.0), Point::new(512.0, 24.0), Point::new(1024.0, 28.0)]),
    ];
    // text off: font rasterization differs across platforms
    let opts = RenderOptions { draw_labels: false, theme: theme.to_string(), ..RenderOptions::default() };
    let cfg = ChartConfig::new(Dimensions::new(480, 320), DomainMax::new(1024.0, 610.0), series, ChartMetadata::default())
        .with_options(opts);
    Chart::new(cfg).expect("chart")
}

#[test]
fn golden_idle_chart() {
    let bytes = chart("light").render_to_png_bytes().expect("render");
    write_or_compare("idle_light.png", &bytes);
}

#[test]
fn golden_hovered_chart() {
    let mut chart = chart("light");
    let at = chart.plot_rect().to_surface(chart.projection().to_pixel(Point::new(512.0, 41.0)));
    chart.pointer_moved(at.x, at.y);
    assert!(chart.active_point().is_some());
    let bytes = chart.render_to_png_bytes().expect("render");
    write_or_compare("hovered_light.png", &bytes);
}

#[test]
fn golden_dark_chart() {
    let bytes = chart("dark").render_to_png_bytes().expect("render");
    write_or_compare("idle_dark.png", &bytes);
}
