//! Dataset loading and cleaning

use crate::error::{LipidError, Result};
use super::{coerce_numeric, LipidRecord, FEATURE_COLUMNS, TARGET_COLUMN};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Per-column cleaning counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    /// Empty or null cells
    pub missing: usize,
    /// Non-empty cells that failed numeric coercion
    pub unparseable: usize,
}

/// What cleaning did to the raw file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub columns: Vec<ColumnStats>,
}

/// Summary of one raw column, for inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub numeric: usize,
    pub missing: usize,
    pub unparseable: usize,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

/// Cleaned, fully numeric training data
#[derive(Debug, Clone)]
pub struct LipidDataset {
    /// Rows × [`FEATURE_COLUMNS`]
    pub features: Array2<f64>,
    /// LDL-C per row
    pub target: Array1<f64>,
    pub report: CleaningReport,
}

impl LipidDataset {
    /// Build a dataset from already-numeric records
    pub fn from_records(records: &[LipidRecord]) -> Self {
        let n = records.len();
        let features = Array2::from_shape_fn((n, FEATURE_COLUMNS.len()), |(r, c)| {
            let f = &records[r].features;
            [f.tc, f.hdl_c, f.tg][c]
        });
        let target = records.iter().map(|r| r.ldl_c).collect();

        Self {
            features,
            target,
            report: CleaningReport {
                rows_read: n,
                rows_kept: n,
                rows_dropped: 0,
                columns: Vec::new(),
            },
        }
    }

    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }
}

/// Reads delimited lipid panel files
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    separator: u8,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self { separator: b',' }
    }

    /// Set the field separator
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Read the file with every column as text
    pub fn read_frame(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let file = File::open(path.as_ref())?;

        let parse_opts = CsvParseOptions::default().with_separator(self.separator);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file)
            .finish()?;

        Ok(df)
    }

    /// Load and clean a training file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LipidDataset> {
        let path = path.as_ref();
        let df = self.read_frame(path)?;
        info!(path = %path.display(), rows = df.height(), columns = df.width(), "Dataset read");
        self.clean(&df)
    }

    /// Coerce the required columns and drop incomplete rows
    pub fn clean(&self, df: &DataFrame) -> Result<LipidDataset> {
        let required: Vec<&str> = FEATURE_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(TARGET_COLUMN))
            .collect();

        let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(required.len());
        let mut stats: Vec<ColumnStats> = Vec::with_capacity(required.len());

        for name in &required {
            let (values, col_stats) = coerce_column(df, name)?;
            columns.push(values);
            stats.push(col_stats);
        }

        let rows_read = df.height();
        let mut flat = Vec::with_capacity(rows_read * FEATURE_COLUMNS.len());
        let mut target = Vec::with_capacity(rows_read);

        for row in 0..rows_read {
            let cells: Option<Vec<f64>> = columns.iter().map(|col| col[row]).collect();
            if let Some(cells) = cells {
                flat.extend_from_slice(&cells[..FEATURE_COLUMNS.len()]);
                target.push(cells[FEATURE_COLUMNS.len()]);
            }
        }

        let rows_kept = target.len();
        let rows_dropped = rows_read - rows_kept;
        if rows_dropped > 0 {
            warn!(rows_dropped, rows_kept, "Dropped rows with missing or non-numeric values");
        }

        let features = Array2::from_shape_vec((rows_kept, FEATURE_COLUMNS.len()), flat)?;

        Ok(LipidDataset {
            features,
            target: Array1::from_vec(target),
            report: CleaningReport {
                rows_read,
                rows_kept,
                rows_dropped,
                columns: stats,
            },
        })
    }

    /// Summarize every column of a raw file
    pub fn describe(&self, path: impl AsRef<Path>) -> Result<Vec<ColumnSummary>> {
        let df = self.read_frame(path)?;

        df.get_column_names()
            .into_iter()
            .map(|name| {
                let (values, stats) = coerce_column(&df, name.as_str())?;
                let numeric: Vec<f64> = values.into_iter().flatten().collect();
                let (min, mean, max) = if numeric.is_empty() {
                    (None, None, None)
                } else {
                    let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    let mean = numeric.iter().sum::<f64>() / numeric.len() as f64;
                    (Some(min), Some(mean), Some(max))
                };

                Ok(ColumnSummary {
                    name: stats.name,
                    numeric: numeric.len(),
                    missing: stats.missing,
                    unparseable: stats.unparseable,
                    min,
                    mean,
                    max,
                })
            })
            .collect()
    }
}

fn coerce_column(df: &DataFrame, name: &str) -> Result<(Vec<Option<f64>>, ColumnStats)> {
    let column = df
        .column(name)
        .map_err(|_| LipidError::FeatureNotFound(name.to_string()))?;
    let as_text = column.cast(&DataType::String)?;
    let text = as_text.str()?;

    let mut stats = ColumnStats {
        name: name.to_string(),
        ..Default::default()
    };

    let values = text
        .into_iter()
        .map(|cell| match cell {
            None => {
                stats.missing += 1;
                None
            }
            Some(raw) if raw.trim().is_empty() => {
                stats.missing += 1;
                None
            }
            Some(raw) => {
                let value = coerce_numeric(raw);
                if value.is_none() {
                    stats.unparseable += 1;
                }
                value
            }
        })
        .collect();

    Ok((values, stats))
}
