// File: crates/benchplot-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG and an SVG.

use benchplot_core::{Chart, ChartConfig, ChartMetadata, Dimensions, DomainMax, Point, RendererMode, Series};

fn config() -> ChartConfig {
    let series = vec![Series::new(
        "linear",
        "Linear",
        vec![Point::new(1.0, 2.0), Point::new(2.0, 1.0), Point::new(4.0, 3.5), Point::new(8.0, 2.5)],
    )];
    ChartConfig::new(Dimensions::default(), DomainMax::new(8.0, 3.5), series, ChartMetadata::new("N", "ns", "smoke"))
}

#[test]
fn render_smoke_png() {
    let chart = Chart::new(config()).expect("chart");
    let out = std::path::PathBuf::from("target/test_out/smoke.png");

    chart.render_to_png(&out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.dimensions(), (760, 480));
}

#[test]
fn render_smoke_svg_via_mode() {
    let chart = Chart::new(config().with_renderer_mode(RendererMode::Vector)).expect("chart");
    let out = std::path::PathBuf::from("target/test_out/smoke.svg");
    chart.render_to_file(&out).expect("render should succeed");
    let text = std::fs::read_to_string(&out).expect("output exists");
    assert!(text.starts_with("<svg "));
}
