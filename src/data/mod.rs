//! Lipid panel datasets
//!
//! Loading, numeric coercion and row filtering for the training data.
//! The model always sees its features in the order of [`FEATURE_COLUMNS`].

mod coerce;
mod loader;

pub use coerce::coerce_numeric;
pub use loader::{CleaningReport, ColumnStats, ColumnSummary, DatasetLoader, LipidDataset};

use serde::{Deserialize, Serialize};

/// Feature columns, in model input order
pub const FEATURE_COLUMNS: [&str; 3] = ["TC", "HDL-C", "TG"];

/// Target column
pub const TARGET_COLUMN: &str = "LDL-C";

/// Default training dataset path
pub const DEFAULT_DATASET_PATH: &str = "inner_Training.csv";

/// Measurement units of a lipid panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LipidUnits {
    /// Milligrams per decilitre
    #[default]
    MgDl,
    /// Millimoles per litre
    MmolL,
}

impl LipidUnits {
    /// Cholesterol conversion factor, mg/dL per mmol/L
    pub const CHOLESTEROL_MG_PER_MMOL: f64 = 38.67;

    /// Divisor applied to TG in the Friedewald equation
    pub fn friedewald_tg_divisor(self) -> f64 {
        match self {
            LipidUnits::MgDl => 5.0,
            LipidUnits::MmolL => 2.2,
        }
    }

    /// Convert a cholesterol value in these units to mg/dL
    pub fn cholesterol_to_mg_dl(self, value: f64) -> f64 {
        match self {
            LipidUnits::MgDl => value,
            LipidUnits::MmolL => value * Self::CHOLESTEROL_MG_PER_MMOL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LipidUnits::MgDl => "mg/dL",
            LipidUnits::MmolL => "mmol/L",
        }
    }
}

impl std::str::FromStr for LipidUnits {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['/', '_'], "-").as_str() {
            "mg-dl" | "mgdl" => Ok(LipidUnits::MgDl),
            "mmol-l" | "mmoll" => Ok(LipidUnits::MmolL),
            other => Err(format!("unknown units '{}', expected mg-dl or mmol-l", other)),
        }
    }
}

/// The three model inputs of one lipid panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LipidFeatures {
    pub tc: f64,
    pub hdl_c: f64,
    pub tg: f64,
}

impl LipidFeatures {
    pub fn new(tc: f64, hdl_c: f64, tg: f64) -> Self {
        Self { tc, hdl_c, tg }
    }

    /// Look up a feature by its column name
    pub fn get(&self, column: &str) -> Option<f64> {
        match column {
            "TC" => Some(self.tc),
            "HDL-C" => Some(self.hdl_c),
            "TG" => Some(self.tg),
            _ => None,
        }
    }

    /// Friedewald estimate of LDL-C
    pub fn friedewald(&self, units: LipidUnits) -> f64 {
        self.tc - self.hdl_c - self.tg / units.friedewald_tg_divisor()
    }
}

/// A fully numeric training row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LipidRecord {
    pub features: LipidFeatures,
    pub ldl_c: f64,
}
