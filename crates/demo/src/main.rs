// File: crates/demo/src/main.rs
// Summary: Demo loads a benchmark results CSV, groups rows per algorithm and renders the chart to PNG/SVG.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchplot_core::{
    BenchRow, BenchmarkName, Cell, Chart, ChartConfig, ChartMetadata, DataAdapter, Dimensions, DomainMax, RenderOptions,
    RendererMode, SeriesSpec,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Optional chart description loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartFile {
    dimensions: Option<Dimensions>,
    metadata: Option<ChartMetadata>,
    /// Metric column to plot; defaults to `cpu_time`.
    metric: Option<String>,
    theme: Option<String>,
    /// Render only this backend; both when unset.
    renderer: Option<RendererMode>,
    /// Scale ceilings; derived from the data when unset.
    domain_max: Option<DomainMax>,
    series: Vec<SeriesEntry>,
    options: Option<RenderOptions>,
    out_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    key: String,
    display_name: Option<String>,
    style_class: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let mut args = std::env::args().skip(1);
    let csv_path = PathBuf::from(args.next().unwrap_or_else(|| "results/cycles.csv".to_string()));
    let chart_file = match args.next() {
        Some(p) => load_chart_file(Path::new(&p))?,
        None => ChartFile::default(),
    };
    info!(input = %csv_path.display(), "using input file");

    let metric = chart_file.metric.clone().unwrap_or_else(|| "cpu_time".to_string());
    let file = std::fs::File::open(&csv_path).with_context(|| format!("opening {}", csv_path.display()))?;
    let rows = load_rows(file, &metric).with_context(|| format!("failed to load CSV '{}'", csv_path.display()))?;
    info!(rows = rows.len(), metric = %metric, "loaded benchmark rows");
    if rows.is_empty() {
        anyhow::bail!("no benchmark rows loaded; check the name and '{metric}' columns.");
    }

    let specs = series_specs(&chart_file, &rows);
    let series = DataAdapter::adapt(&rows, &specs)?;
    for s in &series {
        if s.is_empty() {
            warn!(series = %s.id, "series has no plottable points");
        }
    }

    let domain_max = chart_file.domain_max.unwrap_or_else(|| data_domain(&series));
    debug!(x = domain_max.x, y = domain_max.y, "domain ceilings");

    let mut options = chart_file.options.clone().unwrap_or_default();
    if let Some(theme) = &chart_file.theme {
        options.theme = theme.clone();
    }
    let metadata = chart_file
        .metadata
        .clone()
        .unwrap_or_else(|| ChartMetadata::new("Input Size", metric.clone(), ""));
    let config = ChartConfig::new(chart_file.dimensions.unwrap_or_default(), domain_max, series, metadata)
        .with_renderer_mode(chart_file.renderer.unwrap_or_default())
        .with_options(options);
    let chart = Chart::new(config)?;

    let out_dir = chart_file.out_dir.clone().unwrap_or_else(|| PathBuf::from("target/out"));
    let out = out_name(&out_dir, &csv_path, &metric);
    match chart_file.renderer {
        Some(_) => {
            let output = chart.render()?;
            let path = out.with_extension(output.extension());
            std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
            std::fs::write(&path, output.as_bytes()).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote chart");
        }
        None => {
            let png = out.with_extension("png");
            chart.render_to_png(&png)?;
            info!(path = %png.display(), "wrote chart");
            let svg = out.with_extension("svg");
            chart.render_to_svg(&svg)?;
            info!(path = %svg.display(), "wrote chart");
        }
    }
    Ok(())
}

fn load_chart_file(path: &Path) -> Result<ChartFile> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing chart file {}", path.display()))
}

/// Read benchmark rows from CSV.
///
/// Either an explicit `input_size` column sits next to `name`, or the size is
/// taken from a `BM_<algorithm>/<size>` benchmark name. Rows that match
/// neither are skipped.
fn load_rows(reader: impl Read, metric: &str) -> Result<Vec<BenchRow>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    debug!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_name = idx(&["name", "algorithm", "benchmark"]).context("no name column")?;
    let metric = metric.to_lowercase();
    let i_metric = idx(&[metric.as_str()]).with_context(|| format!("no '{metric}' column"))?;
    let i_size = idx(&["input_size", "inputsize", "size"]);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let (Some(name), Some(value)) = (rec.get(i_name), rec.get(i_metric)) else {
            skipped += 1;
            continue;
        };
        let value = cell(value);
        let row = match i_size.and_then(|i| rec.get(i)) {
            Some(size) => Some(BenchRow::new(name.trim(), cell(size), value)),
            None => BenchmarkName::parse(name).map(|n| n.into_row(value)),
        };
        match row {
            Some(row) => out.push(row),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, "rows without a usable name or size");
    }
    Ok(out)
}

fn cell(raw: &str) -> Cell {
    let raw = raw.trim();
    if raw.is_empty() {
        Cell::Null
    } else if let Ok(i) = raw.parse::<i64>() {
        Cell::Int(i)
    } else {
        Cell::from(raw)
    }
}

/// Configured series, or one series per algorithm in order of appearance.
fn series_specs(file: &ChartFile, rows: &[BenchRow]) -> Vec<SeriesSpec> {
    if file.series.is_empty() {
        return DataAdapter::keys(rows).into_iter().map(SeriesSpec::keyed).collect();
    }
    file.series
        .iter()
        .map(|e| {
            let mut spec = SeriesSpec::keyed(e.key.clone());
            if let Some(name) = &e.display_name {
                spec = spec.with_display_name(name.clone());
            }
            if let Some(class) = &e.style_class {
                spec = spec.with_style_class(class.clone());
            }
            spec
        })
        .collect()
}

/// Largest x and y over all series.
fn data_domain(series: &[benchplot_core::Series]) -> DomainMax {
    let (x, y) = series
        .iter()
        .flat_map(|s| &s.points)
        .fold((0.0f64, 0.0f64), |(x, y), p| (x.max(p.x), y.max(p.y)));
    DomainMax::new(x, y)
}

/// Produce output file name like target/out/chart_<stem>_<metric>
fn out_name(dir: &Path, input: &Path, metric: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("bench");
    dir.join(format!("chart_{stem}_{metric}"))
}
