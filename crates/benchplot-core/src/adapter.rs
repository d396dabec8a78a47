// File: crates/benchplot-core/src/adapter.rs
// Summary: Normalizes tabular benchmark rows into ordered per-series point lists.

use std::fmt;

use tracing::debug;

use crate::error::{ChartError, Result};
use crate::series::{sort_by_x, Point, Series};

/// A loosely typed cell as handed over by a tabular query.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Numeric value of the cell, if it has a finite one.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Cell::Int(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Text(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            Cell::Null => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self { Cell::Int(v) }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Float(v) }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self { Cell::Text(v.to_string()) }
}

impl From<String> for Cell {
    fn from(v: String) -> Self { Cell::Text(v) }
}

/// One row of benchmark results: `{algorithm, inputSize, metricValue}`.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchRow {
    pub series_key: String,
    pub input_size: Cell,
    pub metric: Cell,
}

impl BenchRow {
    pub fn new(series_key: impl Into<String>, input_size: impl Into<Cell>, metric: impl Into<Cell>) -> Self {
        Self { series_key: series_key.into(), input_size: input_size.into(), metric: metric.into() }
    }

    fn point(&self) -> Option<Point> {
        Some(Point::new(self.input_size.as_f64()?, self.metric.as_f64()?))
    }
}

type RowFilter = Box<dyn Fn(&BenchRow) -> bool>;

/// Caller's description of one series to extract from the rows.
pub struct SeriesSpec {
    pub key: Option<String>,
    filter: Option<RowFilter>,
    pub display_name: String,
    pub style_class: String,
}

impl SeriesSpec {
    /// Select rows whose `series_key` equals `key`.
    pub fn keyed(key: impl Into<String>) -> Self {
        let key = key.into();
        Self { display_name: key.clone(), key: Some(key), filter: None, style_class: String::new() }
    }

    /// Select rows accepted by `filter`.
    pub fn filtered(display_name: impl Into<String>, filter: impl Fn(&BenchRow) -> bool + 'static) -> Self {
        Self { key: None, filter: Some(Box::new(filter)), display_name: display_name.into(), style_class: String::new() }
    }

    /// A spec with no selector at all; only useful to build one up field by field.
    pub fn unselected(display_name: impl Into<String>) -> Self {
        Self { key: None, filter: None, display_name: display_name.into(), style_class: String::new() }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_style_class(mut self, class: impl Into<String>) -> Self {
        self.style_class = class.into();
        self
    }

    pub fn with_filter(mut self, filter: impl Fn(&BenchRow) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    fn has_selector(&self) -> bool {
        self.filter.is_some() || self.key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn accepts(&self, row: &BenchRow) -> bool {
        let key_ok = match self.key.as_deref() {
            Some(k) if !k.is_empty() => row.series_key == k,
            _ => true,
        };
        key_ok && self.filter.as_ref().map_or(true, |f| f(row))
    }

    fn id(&self) -> String {
        match self.key.as_deref() {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => self.display_name.clone(),
        }
    }
}

impl fmt::Debug for SeriesSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesSpec")
            .field("key", &self.key)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("display_name", &self.display_name)
            .field("style_class", &self.style_class)
            .finish()
    }
}

pub struct DataAdapter;

impl DataAdapter {
    /// Turn `rows` into one series per spec, in spec order.
    ///
    /// Every spec is validated before any row is looked at. Rows whose input
    /// size or metric is missing or non-finite are skipped.
    pub fn adapt(rows: &[BenchRow], specs: &[SeriesSpec]) -> Result<Vec<Series>> {
        if specs.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if let Some((index, spec)) = specs.iter().enumerate().find(|(_, s)| !s.has_selector()) {
            return Err(ChartError::MissingSelector { index, display_name: spec.display_name.clone() });
        }

        let mut out = Vec::with_capacity(specs.len());
        for spec in specs {
            let mut dropped = 0usize;
            let mut points = Vec::new();
            for row in rows.iter().filter(|r| spec.accepts(r)) {
                match row.point() {
                    Some(p) => points.push(p),
                    None => dropped += 1,
                }
            }
            sort_by_x(&mut points);
            debug!(series = %spec.id(), points = points.len(), dropped, "adapted series");
            out.push(Series {
                id: spec.id(),
                display_name: spec.display_name.clone(),
                style_class: spec.style_class.clone(),
                points,
            });
        }
        Ok(out)
    }

    /// Distinct series keys in first-appearance order.
    pub fn keys(rows: &[BenchRow]) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for row in rows {
            if !keys.iter().any(|k| *k == row.series_key) {
                keys.push(row.series_key.clone());
            }
        }
        keys
    }
}

/// A benchmark name of the form `<prefix>_<algorithm>/<inputSize>`.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkName {
    pub prefix: String,
    pub algorithm: String,
    pub input_size: f64,
}

impl BenchmarkName {
    /// Split e.g. `BM_branchless_search/1024` into
    /// prefix `BM`, algorithm `branchless_search`, input size `1024`.
    pub fn parse(name: &str) -> Option<Self> {
        let (head, size) = name.trim().rsplit_once('/')?;
        let (prefix, algorithm) = head.split_once('_')?;
        if algorithm.is_empty() {
            return None;
        }
        let input_size = size.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { prefix: prefix.to_string(), algorithm: algorithm.to_string(), input_size })
    }

    /// Row for this benchmark with the given metric cell.
    pub fn into_row(self, metric: impl Into<Cell>) -> BenchRow {
        BenchRow { series_key: self.algorithm, input_size: Cell::Float(self.input_size), metric: metric.into() }
    }
}
