// File: crates/benchplot-core/tests/adapter.rs
// Purpose: Row grouping, numeric coercion, sorting and selector validation in the data adapter.

use benchplot_core::{BenchRow, BenchmarkName, Cell, ChartError, DataAdapter, Point, SeriesSpec};

fn rows() -> Vec<BenchRow> {
    vec![
        BenchRow::new("linear", 4i64, 40.0),
        BenchRow::new("branchless", 1i64, 9.0),
        BenchRow::new("linear", 1i64, 10.0),
        BenchRow::new("branchless", 4i64, "21"),
        BenchRow::new("linear", 2i64, 20.0),
        BenchRow::new("branchless", 2i64, Cell::Null),
    ]
}

#[test]
fn groups_by_key_in_spec_order() {
    let specs = vec![SeriesSpec::keyed("branchless"), SeriesSpec::keyed("linear").with_display_name("Linear scan")];
    let series = DataAdapter::adapt(&rows(), &specs).expect("adapt");

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].id, "branchless");
    assert_eq!(series[1].id, "linear");
    assert_eq!(series[1].display_name, "Linear scan");
    assert_eq!(series[1].points, vec![Point::new(1.0, 10.0), Point::new(2.0, 20.0), Point::new(4.0, 40.0)]);
}

#[test]
fn non_finite_or_missing_metrics_are_dropped() {
    let rows = vec![
        BenchRow::new("a", 1i64, 10.0),
        BenchRow::new("a", 2i64, f64::NAN),
        BenchRow::new("a", 3i64, 30.0),
    ];
    let series = DataAdapter::adapt(&rows, &[SeriesSpec::keyed("a")]).expect("adapt");
    assert_eq!(series[0].points, vec![Point::new(1.0, 10.0), Point::new(3.0, 30.0)]);

    // Null and text that is not a number go the same way
    let series = DataAdapter::adapt(&self::rows(), &[SeriesSpec::keyed("branchless")]).expect("adapt");
    assert_eq!(series[0].points, vec![Point::new(1.0, 9.0), Point::new(4.0, 21.0)]);
}

#[test]
fn infinite_input_size_is_dropped() {
    let rows = vec![BenchRow::new("a", f64::INFINITY, 1.0), BenchRow::new("a", "inf", 1.0), BenchRow::new("a", 8i64, 1.0)];
    let series = DataAdapter::adapt(&rows, &[SeriesSpec::keyed("a")]).expect("adapt");
    assert_eq!(series[0].points, vec![Point::new(8.0, 1.0)]);
}

#[test]
fn equal_x_keeps_ingestion_order() {
    let rows = vec![
        BenchRow::new("a", 2i64, 1.0),
        BenchRow::new("a", 1i64, 5.0),
        BenchRow::new("a", 2i64, 2.0),
        BenchRow::new("a", 2i64, 3.0),
    ];
    let series = DataAdapter::adapt(&rows, &[SeriesSpec::keyed("a")]).expect("adapt");
    let ys = series[0].points.iter().map(|p| p.y).collect::<Vec<_>>();
    assert_eq!(ys, vec![5.0, 1.0, 2.0, 3.0]);
}

#[test]
fn filter_selects_rows_without_a_key() {
    let spec = SeriesSpec::filtered("small inputs", |r| r.input_size.as_f64().is_some_and(|v| v <= 2.0));
    let series = DataAdapter::adapt(&rows(), &[spec]).expect("adapt");
    assert_eq!(series[0].id, "small inputs");
    assert_eq!(series[0].points.len(), 3);
    assert!(series[0].points.windows(2).all(|w| w[0].x <= w[1].x));
}

#[test]
fn key_and_filter_both_apply() {
    let spec = SeriesSpec::keyed("linear").with_filter(|r| r.input_size.as_f64() != Some(4.0));
    let series = DataAdapter::adapt(&rows(), &[spec]).expect("adapt");
    assert_eq!(series[0].points, vec![Point::new(1.0, 10.0), Point::new(2.0, 20.0)]);
}

#[test]
fn spec_without_selector_fails_before_reading_rows() {
    let specs = vec![SeriesSpec::keyed("linear"), SeriesSpec::unselected("mystery")];
    let err = DataAdapter::adapt(&rows(), &specs).unwrap_err();
    assert_eq!(err, ChartError::MissingSelector { index: 1, display_name: "mystery".into() });

    // An empty key is not a resolvable key
    let err = DataAdapter::adapt(&[], &[SeriesSpec::keyed("")]).unwrap_err();
    assert!(matches!(err, ChartError::MissingSelector { index: 0, .. }));
}

#[test]
fn no_specs_is_a_configuration_error() {
    assert_eq!(DataAdapter::adapt(&rows(), &[]).unwrap_err(), ChartError::NoSeries);
}

#[test]
fn unknown_key_yields_empty_series() {
    let series = DataAdapter::adapt(&rows(), &[SeriesSpec::keyed("eytzinger")]).expect("adapt");
    assert!(series[0].is_empty());
}

#[test]
fn keys_in_first_appearance_order() {
    assert_eq!(DataAdapter::keys(&rows()), vec!["linear".to_string(), "branchless".to_string()]);
}

#[test]
fn cell_coercion() {
    assert_eq!(Cell::Int(42).as_f64(), Some(42.0));
    assert_eq!(Cell::from(" 1,024 ").as_f64(), Some(1024.0));
    assert_eq!(Cell::from("n/a").as_f64(), None);
    assert_eq!(Cell::Float(f64::NEG_INFINITY).as_f64(), None);
    assert_eq!(Cell::Null.as_f64(), None);
}

#[test]
fn benchmark_names() {
    let name = BenchmarkName::parse("BM_branchless_search/1024").expect("parse");
    assert_eq!(name.prefix, "BM");
    assert_eq!(name.algorithm, "branchless_search");
    assert_eq!(name.input_size, 1024.0);

    let row = name.into_row(Cell::Int(3100));
    assert_eq!(row.series_key, "branchless_search");
    assert_eq!(row.input_size.as_f64(), Some(1024.0));

    assert_eq!(BenchmarkName::parse("BM_linear"), None);
    assert_eq!(BenchmarkName::parse("nounderscore/8"), None);
    assert_eq!(BenchmarkName::parse("BM_/8"), None);
    assert_eq!(BenchmarkName::parse("BM_linear/big"), None);
}
