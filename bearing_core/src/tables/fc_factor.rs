//! ISO 281 fc Factor Table
//!
//! Geometry factor fc for radial roller bearings tabulated against
//! Dwe·cos α / Dpw (ISO 281:2007 Table 7). The built-in table covers
//! ratios 0.01 to 0.30.
//!
//! Lookups interpolate linearly between rows. Ratios outside the tabulated
//! range are clamped to the nearest boundary row; the table is never
//! extrapolated.
//!
//! ## CSV Format
//!
//! ```text
//! ratio,fc
//! 0.10,84.2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, Stage};

/// One fc table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcFactorRecord {
    /// Dwe·cos α / Dpw
    pub ratio: f64,
    /// fc geometry factor
    pub fc: f64,
}

#[derive(Debug, Deserialize)]
struct RawFcRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ratio: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    fc: Option<f64>,
}

/// Result of an fc lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcLookup {
    /// Ratio after clamping to the table domain
    pub ratio: f64,
    /// Interpolated fc
    pub fc: f64,
    /// True when the requested ratio fell outside the table and was clamped
    pub clamped: bool,
}

/// fc table sorted by ratio.
#[derive(Debug, Clone, Default)]
pub struct FcTable {
    rows: Vec<FcFactorRecord>,
}

impl FcTable {
    /// Build a table from records in any order.
    pub fn from_records(mut rows: Vec<FcFactorRecord>) -> Self {
        rows.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
        FcTable { rows }
    }

    /// Parse a table from CSV text.
    pub fn from_csv_str(text: &str) -> CalcResult<Self> {
        let raw: Vec<RawFcRow> = super::read_csv_str(text)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a table from a CSV file.
    pub fn load_from_csv(path: &Path) -> CalcResult<Self> {
        let raw: Vec<RawFcRow> = super::read_csv_file(path)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: Vec<RawFcRow>) -> Self {
        let total = raw.len();
        let records: Vec<FcFactorRecord> = raw
            .into_iter()
            .filter_map(|r| match (r.ratio, r.fc) {
                (Some(ratio), Some(fc)) if ratio.is_finite() && fc.is_finite() => {
                    Some(FcFactorRecord { ratio, fc })
                }
                _ => None,
            })
            .collect();
        if records.len() < total {
            tracing::warn!(dropped = total - records.len(), "incomplete fc rows dropped");
        }
        Self::from_records(records)
    }

    pub fn rows(&self) -> &[FcFactorRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tabulated ratio range (min, max)
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.rows.first()?.ratio, self.rows.last()?.ratio))
    }

    /// Interpolate fc at `ratio`, clamping to the table domain.
    pub fn fc_at(&self, ratio: f64) -> CalcResult<FcLookup> {
        let (lo, hi) = self
            .domain()
            .ok_or_else(|| CalcError::lookup_failed(Stage::LoadRating, "fc factor", "table is empty"))?;
        if !ratio.is_finite() {
            return Err(CalcError::invalid_input("ratio", ratio.to_string(), "Ratio must be finite"));
        }

        let clamped_ratio = ratio.clamp(lo, hi);
        let clamped = clamped_ratio != ratio;

        // first row with ratio >= x
        let idx = self.rows.partition_point(|r| r.ratio < clamped_ratio);
        let upper = self.rows[idx];
        let fc = if idx == 0 || upper.ratio == clamped_ratio {
            upper.fc
        } else {
            let lower = self.rows[idx - 1];
            lower.fc + (clamped_ratio - lower.ratio) / (upper.ratio - lower.ratio) * (upper.fc - lower.fc)
        };

        Ok(FcLookup {
            ratio: clamped_ratio,
            fc,
            clamped,
        })
    }
}

/// Built-in ISO 281 fc table
pub(crate) fn builtin() -> FcTable {
    FcTable::from_csv_str(include_str!("../../data/fc_factor.csv")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "built-in fc table failed to parse");
        FcTable::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_row() {
        let table = builtin();
        let lookup = table.fc_at(0.10).unwrap();
        assert_eq!(lookup.fc, 84.2);
        assert!(!lookup.clamped);
    }

    #[test]
    fn test_linear_between_rows() {
        let table = builtin();
        // halfway between 0.11 (85.4) and 0.12 (86.4)
        let lookup = table.fc_at(0.115).unwrap();
        assert!((lookup.fc - 85.9).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_below_domain() {
        let table = builtin();
        for ratio in [0.0, 0.005, -1.0] {
            let lookup = table.fc_at(ratio).unwrap();
            assert_eq!(lookup.fc, 52.1);
            assert_eq!(lookup.ratio, 0.01);
            assert!(lookup.clamped);
        }
    }

    #[test]
    fn test_clamped_above_domain() {
        let table = builtin();
        for ratio in [0.31, 0.5, 10.0] {
            let lookup = table.fc_at(ratio).unwrap();
            assert_eq!(lookup.fc, 83.8);
            assert_eq!(lookup.ratio, 0.30);
            assert!(lookup.clamped);
        }
    }

    #[test]
    fn test_boundaries_not_flagged_as_clamped() {
        let table = builtin();
        assert!(!table.fc_at(0.01).unwrap().clamped);
        assert!(!table.fc_at(0.30).unwrap().clamped);
    }

    #[test]
    fn test_empty_table_fails() {
        let err = FcTable::default().fc_at(0.1).unwrap_err();
        assert_eq!(err.error_code(), "LOOKUP_FAILED");
    }

    #[test]
    fn test_single_row_table() {
        let table = FcTable::from_records(vec![FcFactorRecord { ratio: 0.1, fc: 80.0 }]);
        assert_eq!(table.fc_at(0.05).unwrap().fc, 80.0);
        assert_eq!(table.fc_at(0.2).unwrap().fc, 80.0);
    }
}
