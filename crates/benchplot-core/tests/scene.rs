// File: crates/benchplot-core/tests/scene.rs
// Purpose: Layer composition: ordering, legend, tooltip placement, crosshair, label toggles and SVG output.

use benchplot_core::{
    Chart, ChartConfig, ChartMetadata, Dimensions, DomainMax, LayerKind, Node, Point, RenderOptions, RenderOutput,
    RendererMode, Series,
};

fn two_series() -> Vec<Series> {
    vec![
        Series::new("linear", "Linear", vec![Point::new(1.0, 10.0), Point::new(2.0, 20.0), Point::new(4.0, 40.0)]),
        Series::new("eytzinger", "Eytzinger", vec![Point::new(1.0, 4.0), Point::new(2.0, 6.0), Point::new(4.0, 7.0)]),
    ]
}

fn config(options: RenderOptions) -> ChartConfig {
    ChartConfig::new(
        Dimensions::default(),
        DomainMax::new(4.0, 40.0),
        two_series(),
        ChartMetadata::new("Input size", "Cycles", "Lookup cost by input size"),
    )
    .with_options(options)
}

fn kinds(chart: &Chart) -> Vec<LayerKind> {
    chart.scene().layers.iter().map(|l| l.kind).collect()
}

fn texts(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| match n {
            Node::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}

fn hover(chart: &mut Chart, p: Point) {
    let at = chart.plot_rect().to_surface(chart.projection().to_pixel(p));
    chart.pointer_moved(at.x, at.y);
}

#[test]
fn idle_layers_in_paint_order() {
    let chart = Chart::new(config(RenderOptions::default())).expect("chart");
    assert_eq!(
        kinds(&chart),
        vec![
            LayerKind::Frame,
            LayerKind::Grid,
            LayerKind::Axes,
            LayerKind::Series,
            LayerKind::Crosshair,
            LayerKind::Legend,
            LayerKind::Caption,
        ]
    );
    // nothing to cross until the pointer arrives
    assert!(chart.scene().layer(LayerKind::Crosshair).is_some_and(|l| l.nodes.is_empty()));
}

#[test]
fn hover_adds_highlight_and_tooltip_above_the_legend() {
    let mut chart = Chart::new(config(RenderOptions::default())).expect("chart");
    hover(&mut chart, Point::new(2.0, 20.0));
    let k = kinds(&chart);
    let legend = k.iter().position(|&x| x == LayerKind::Legend).expect("legend");
    let highlight = k.iter().position(|&x| x == LayerKind::Highlight).expect("highlight");
    let tooltip = k.iter().position(|&x| x == LayerKind::Tooltip).expect("tooltip");
    assert!(legend < highlight && highlight < tooltip);

    let scene = chart.scene();
    let crosshair = scene.layer(LayerKind::Crosshair).expect("crosshair");
    assert_eq!(crosshair.nodes.len(), 2);

    let tooltip = scene.layer(LayerKind::Tooltip).expect("tooltip");
    assert_eq!(texts(&tooltip.nodes), vec!["LINEAR", "Cycles:", "20", "Input size:", "2"]);
}

#[test]
fn tooltip_stays_on_the_surface() {
    let mut chart = Chart::new(config(RenderOptions::default())).expect("chart");
    // top-right point: the default offset would push the box off the right and top edges
    hover(&mut chart, Point::new(4.0, 40.0));
    let scene = chart.scene();
    let tooltip = scene.layer(LayerKind::Tooltip).expect("tooltip");
    let Some(Node::Rect { rect, .. }) = tooltip.nodes.first() else { panic!("tooltip box first") };
    assert!(rect.left >= 0.0 && rect.top >= 0.0);
    assert!(rect.right <= f64::from(scene.width));
    assert!(rect.bottom <= f64::from(scene.height));
}

#[test]
fn legend_lists_series_in_order_aligned_right() {
    let chart = Chart::new(config(RenderOptions::default())).expect("chart");
    let scene = chart.scene();
    let legend = scene.layer(LayerKind::Legend).expect("legend");
    assert_eq!(texts(&legend.nodes), vec!["Linear", "Eytzinger"]);

    let swatches = legend
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::Rect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(swatches.len(), 2);
    assert!(swatches[0].left < swatches[1].left);
    assert!(swatches.iter().all(|r| r.bottom <= chart.plot_rect().top));
}

#[test]
fn labels_off_drops_every_text_node() {
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let mut chart = Chart::new(config(opts)).expect("chart");
    hover(&mut chart, Point::new(1.0, 10.0));
    let scene = chart.scene();
    assert!(scene.layer(LayerKind::Axes).is_none());
    assert!(scene.layer(LayerKind::Caption).is_none());
    let text_nodes = scene.layers.iter().flat_map(|l| &l.nodes).filter(|n| matches!(n, Node::Text(_))).count();
    assert_eq!(text_nodes, 0);
    // tooltip box is still drawn
    assert_eq!(scene.layer(LayerKind::Tooltip).map(|l| l.nodes.len()), Some(1));
}

#[test]
fn crosshair_can_be_disabled() {
    let opts = RenderOptions { crosshair: false, ..RenderOptions::default() };
    let mut chart = Chart::new(config(opts)).expect("chart");
    hover(&mut chart, Point::new(1.0, 10.0));
    assert!(!kinds(&chart).contains(&LayerKind::Crosshair));
}

#[test]
fn axis_titles_are_uppercased() {
    let chart = Chart::new(config(RenderOptions::default())).expect("chart");
    let scene = chart.scene();
    let axes = texts(&scene.layer(LayerKind::Axes).expect("axes").nodes);
    assert!(axes.contains(&"INPUT SIZE".to_string()));
    assert!(axes.contains(&"CYCLES".to_string()));
    assert!(axes.contains(&"0".to_string()));
}

#[test]
fn empty_series_draw_no_path() {
    let mut series = two_series();
    series.push(Series::new("none", "Nothing", vec![]));
    let cfg = ChartConfig::new(Dimensions::default(), DomainMax::new(4.0, 40.0), series, ChartMetadata::default());
    let chart = Chart::new(cfg).expect("chart");
    let scene = chart.scene();
    let paths = scene.layer(LayerKind::Series).expect("series").nodes.iter().filter(|n| matches!(n, Node::Path { .. })).count();
    assert_eq!(paths, 2);

    let svg = chart.render_to_svg_string();
    assert_eq!(svg.matches("<path ").count(), 2);
    // legend still lists the empty series
    assert!(svg.contains("Nothing"));
}

#[test]
fn svg_document_shape() {
    let cfg = config(RenderOptions::default()).with_renderer_mode(RendererMode::Vector);
    let chart = Chart::new(cfg).expect("chart");
    let out = chart.render().expect("render");
    assert_eq!(out.extension(), "svg");
    let RenderOutput::Svg(svg) = out else { panic!("vector mode renders svg") };
    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"<clipPath id="clip-series">"#));
    assert!(svg.contains(r#"<g id="legend">"#));
    assert!(svg.contains("Lookup cost by input size"));
}

#[test]
fn svg_escapes_text() {
    let series = vec![Series::new("a", "A<B & C>", vec![Point::new(1.0, 1.0)])];
    let cfg = ChartConfig::new(Dimensions::default(), DomainMax::new(1.0, 1.0), series, ChartMetadata::default());
    let svg = Chart::new(cfg).expect("chart").render_to_svg_string();
    assert!(svg.contains("A&lt;B &amp; C&gt;"));
    assert!(!svg.contains("A<B"));
}

#[test]
fn options_load_from_toml() {
    let opts: RenderOptions = toml::from_str(
        r#"
        hit_threshold_px = 40.0
        draw_labels = false
        theme = "dark"

        [insets]
        left = 10
        right = 10
        top = 10
        bottom = 10
        "#,
    )
    .expect("valid toml");
    assert_eq!(opts.hit_threshold_px, 40.0);
    assert!(!opts.draw_labels);
    assert_eq!(opts.insets.hsum(), 20);
    // untouched fields keep their defaults
    assert_eq!(opts.tooltip_offset, RenderOptions::default().tooltip_offset);

    let mode = toml::Value::String("vector".into()).try_into::<RendererMode>().expect("mode");
    assert_eq!(mode, RendererMode::Vector);
}
