//! Race-Groove Clearance Table
//!
//! Race-groove clearance F (mm) tabulated by bore and outer diameter. The
//! table does not cover every (d, D) pair; the reference interpolator in
//! [`crate::calculations::race_groove`] blends or falls back between rows.
//!
//! Records are kept sorted by (inner_diameter, outer_diameter) so anchor
//! searches can binary-search the inner diameter instead of scanning.
//!
//! ## CSV Format
//!
//! ```text
//! inner_diameter,outer_diameter,F
//! 180,250,194.0
//! ```
//!
//! Rows with any missing value are dropped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// One race-groove table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceGrooveRecord {
    /// Bore diameter d (mm)
    pub inner_diameter_mm: f64,
    /// Outer diameter D (mm)
    pub outer_diameter_mm: f64,
    /// Race-groove clearance F (mm)
    pub f_mm: f64,
}

#[derive(Debug, Deserialize)]
struct RawRaceGrooveRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    inner_diameter: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    outer_diameter: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    f: Option<f64>,
}

impl RawRaceGrooveRow {
    fn into_record(self) -> Option<RaceGrooveRecord> {
        let record = RaceGrooveRecord {
            inner_diameter_mm: self.inner_diameter?,
            outer_diameter_mm: self.outer_diameter?,
            f_mm: self.f?,
        };
        let finite = record.inner_diameter_mm.is_finite()
            && record.outer_diameter_mm.is_finite()
            && record.f_mm.is_finite();
        finite.then_some(record)
    }
}

/// Race-groove table sorted by (inner, outer).
#[derive(Debug, Clone, Default)]
pub struct RaceGrooveTable {
    rows: Vec<RaceGrooveRecord>,
}

impl RaceGrooveTable {
    /// Build a table from records in any order.
    pub fn from_records(mut rows: Vec<RaceGrooveRecord>) -> Self {
        rows.sort_by(|a, b| {
            a.inner_diameter_mm
                .total_cmp(&b.inner_diameter_mm)
                .then(a.outer_diameter_mm.total_cmp(&b.outer_diameter_mm))
        });
        RaceGrooveTable { rows }
    }

    /// Parse a table from CSV text.
    pub fn from_csv_str(text: &str) -> CalcResult<Self> {
        let raw: Vec<RawRaceGrooveRow> = super::read_csv_str(text)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a table from a CSV file.
    pub fn load_from_csv(path: &Path) -> CalcResult<Self> {
        let raw: Vec<RawRaceGrooveRow> = super::read_csv_file(path)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: Vec<RawRaceGrooveRow>) -> Self {
        let total = raw.len();
        let records: Vec<RaceGrooveRecord> =
            raw.into_iter().filter_map(RawRaceGrooveRow::into_record).collect();
        if records.len() < total {
            tracing::warn!(dropped = total - records.len(), "incomplete race-groove rows dropped");
        }
        Self::from_records(records)
    }

    /// Rows sorted by (inner, outer)
    pub fn rows(&self) -> &[RaceGrooveRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of leading rows whose inner diameter is <= `d`.
    pub(crate) fn count_inner_at_most(&self, d: f64) -> usize {
        self.rows.partition_point(|r| r.inner_diameter_mm <= d)
    }

    /// Index of the first row whose inner diameter is >= `d`.
    pub(crate) fn first_inner_at_least(&self, d: f64) -> usize {
        self.rows.partition_point(|r| r.inner_diameter_mm < d)
    }
}

/// Built-in race-groove table
pub(crate) fn builtin() -> RaceGrooveTable {
    RaceGrooveTable::from_csv_str(include_str!("../../data/race_groove.csv")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "built-in race-groove table failed to parse");
        RaceGrooveTable::default()
    })
}
