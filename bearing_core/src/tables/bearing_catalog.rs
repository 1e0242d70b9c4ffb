//! Bearing Catalog
//!
//! Optional list of catalogued four-row cylindrical roller bearings. It is
//! used only to prefill the boundary dimensions of a design and to show the
//! manufacturer's Cr next to the computed one; it never feeds the rating
//! formulas.
//!
//! ## CSV Format
//!
//! ```text
//! designation,d,D,B,catalog_Cr
//! 180RV2501,180,250,160,1830
//! ```
//!
//! `catalog_Cr` (kN) may be blank. Rows missing the designation or any
//! dimension are dropped.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::geometry::GeometryInput;
use crate::errors::{CalcError, CalcResult, Stage};

/// One catalogued bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingRecord {
    /// Manufacturer designation (e.g., "180RV2501")
    pub designation: String,
    /// Bore diameter d (mm)
    pub d_mm: f64,
    /// Outer diameter D (mm)
    pub outer_d_mm: f64,
    /// Width B (mm)
    pub b_mm: f64,
    /// Published basic dynamic load rating (kN)
    pub catalog_cr_kn: Option<f64>,
}

impl BearingRecord {
    /// Boundary dimensions as a design geometry input
    pub fn geometry(&self) -> GeometryInput {
        GeometryInput {
            d_mm: self.d_mm,
            outer_d_mm: self.outer_d_mm,
            b_mm: self.b_mm,
        }
    }
}

/// Build a record from a CSV row laid out as designation, d, D, B, catalog_Cr.
///
/// Columns are read by position: "d" and "D" differ only by case.
fn record_from_row(row: &csv::StringRecord) -> Option<BearingRecord> {
    let designation = row.get(0).map(str::trim).filter(|s| !s.is_empty())?;
    let number = |idx: usize| row.get(idx).and_then(parse_optional_f64);
    Some(BearingRecord {
        designation: designation.to_string(),
        d_mm: number(1)?,
        outer_d_mm: number(2)?,
        b_mm: number(3)?,
        catalog_cr_kn: number(4),
    })
}

/// Parse an optional f64 from a CSV field
///
/// Returns None for empty strings, dashes, or invalid numbers.
fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Bearing catalog indexed by uppercase designation.
#[derive(Debug, Clone, Default)]
pub struct BearingCatalog {
    bearings: HashMap<String, BearingRecord>,
}

impl BearingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from CSV text.
    pub fn from_csv_str(text: &str) -> CalcResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut rows = Vec::new();
        for row in reader.records() {
            rows.push(row?);
        }
        Ok(Self::from_rows(&rows))
    }

    /// Load a catalog from a CSV file.
    pub fn load_from_csv(path: &Path) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_csv_str(&text)
            .map_err(|e| CalcError::file_error("parse", path.display().to_string(), e.to_string()))
    }

    fn from_rows(rows: &[csv::StringRecord]) -> Self {
        let total = rows.len();
        let mut catalog = BearingCatalog::new();
        for record in rows.iter().filter_map(record_from_row) {
            catalog.insert(record);
        }
        if catalog.len() < total {
            tracing::warn!(dropped = total - catalog.len(), "incomplete bearing catalog rows dropped");
        }
        catalog
    }

    /// Insert a bearing, replacing any entry with the same designation
    pub fn insert(&mut self, record: BearingRecord) {
        self.bearings.insert(record.designation.to_uppercase(), record);
    }

    /// Look up a bearing by designation (case-insensitive)
    pub fn lookup(&self, designation: &str) -> CalcResult<&BearingRecord> {
        self.bearings.get(&designation.trim().to_uppercase()).ok_or_else(|| {
            CalcError::lookup_failed(
                Stage::Input,
                "bearing catalog",
                format!("designation '{}' not found", designation),
            )
        })
    }

    /// All designations, sorted
    pub fn designations(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.bearings.values().map(|b| b.designation.as_str()).collect();
        out.sort_unstable();
        out
    }

    pub fn len(&self) -> usize {
        self.bearings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bearings.is_empty()
    }
}

/// Built-in bearing catalog
pub(crate) fn builtin() -> BearingCatalog {
    BearingCatalog::from_csv_str(include_str!("../../data/bearing_catalog.csv")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "built-in bearing catalog failed to parse");
        BearingCatalog::default()
    })
}
