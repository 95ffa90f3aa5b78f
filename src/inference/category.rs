//! LDL-C reference ranges

use crate::data::LipidUnits;
use serde::Serialize;

/// Clinical category of an LDL-C value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LdlCategory {
    Optimal,
    NearOptimal,
    BorderlineHigh,
    High,
    VeryHigh,
}

impl LdlCategory {
    /// Classify a value given in mg/dL
    pub fn from_mg_dl(ldl_c: f64) -> Self {
        match ldl_c {
            v if v < 100.0 => LdlCategory::Optimal,
            v if v < 130.0 => LdlCategory::NearOptimal,
            v if v < 160.0 => LdlCategory::BorderlineHigh,
            v if v < 190.0 => LdlCategory::High,
            _ => LdlCategory::VeryHigh,
        }
    }

    /// Classify a value in the given units
    pub fn classify(ldl_c: f64, units: LipidUnits) -> Self {
        Self::from_mg_dl(units.cholesterol_to_mg_dl(ldl_c))
    }

    pub fn label(self) -> &'static str {
        match self {
            LdlCategory::Optimal => "Optimal",
            LdlCategory::NearOptimal => "Near Optimal",
            LdlCategory::BorderlineHigh => "Borderline High",
            LdlCategory::High => "High",
            LdlCategory::VeryHigh => "Very High",
        }
    }

    /// Range in mg/dL, as printed on reports
    pub fn range(self) -> &'static str {
        match self {
            LdlCategory::Optimal => "< 100 mg/dL",
            LdlCategory::NearOptimal => "100-129 mg/dL",
            LdlCategory::BorderlineHigh => "130-159 mg/dL",
            LdlCategory::High => "160-189 mg/dL",
            LdlCategory::VeryHigh => ">= 190 mg/dL",
        }
    }
}
