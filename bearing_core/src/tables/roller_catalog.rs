//! Cylindrical Roller Catalog
//!
//! Standard roller dimensions (diameter Dw, length Lw, corner radius bounds
//! and mass of 100 rollers). The source file lists rows in no particular
//! order; at load time rows are sorted by Dw descending, then Lw descending,
//! with catalog order preserved among identical (Dw, Lw) pairs. The roller
//! selector relies on that ordering.
//!
//! ## CSV Format
//!
//! ```text
//! dw,lw,r_min,r_max,mass_per_100
//! 20,28,0.5,1.1,6.904
//! ```
//!
//! Rows missing `dw` or `lw` are dropped. Missing radii or mass read as 0.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// One catalog roller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollerRecord {
    /// Roller diameter Dw (mm)
    pub dw_mm: f64,
    /// Roller length Lw (mm)
    pub lw_mm: f64,
    /// Minimum corner radius (mm)
    pub r_min_mm: f64,
    /// Maximum corner radius (mm)
    pub r_max_mm: f64,
    /// Mass of 100 rollers
    pub mass_per_100: f64,
}

impl std::fmt::Display for RollerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {} mm", self.dw_mm, self.lw_mm)
    }
}

#[derive(Debug, Deserialize)]
struct RawRollerRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    dw: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lw: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    r_min: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    r_max: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    mass_per_100: Option<f64>,
}

impl RawRollerRow {
    fn into_record(self) -> Option<RollerRecord> {
        let dw = self.dw.filter(|v| v.is_finite() && *v > 0.0)?;
        let lw = self.lw.filter(|v| v.is_finite() && *v > 0.0)?;
        Some(RollerRecord {
            dw_mm: dw,
            lw_mm: lw,
            r_min_mm: self.r_min.unwrap_or(0.0),
            r_max_mm: self.r_max.unwrap_or(0.0),
            mass_per_100: self.mass_per_100.unwrap_or(0.0),
        })
    }
}

/// Roller catalog held in selection order (Dw desc, Lw desc).
#[derive(Debug, Clone, Default)]
pub struct RollerCatalog {
    rows: Vec<RollerRecord>,
}

impl RollerCatalog {
    /// Build a catalog from records in any order.
    pub fn from_records(mut rows: Vec<RollerRecord>) -> Self {
        // stable: equal (dw, lw) keep catalog order
        rows.sort_by(|a, b| b.dw_mm.total_cmp(&a.dw_mm).then(b.lw_mm.total_cmp(&a.lw_mm)));
        RollerCatalog { rows }
    }

    /// Parse a catalog from CSV text.
    pub fn from_csv_str(text: &str) -> CalcResult<Self> {
        let raw: Vec<RawRollerRow> = super::read_csv_str(text)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a catalog from a CSV file.
    pub fn load_from_csv(path: &Path) -> CalcResult<Self> {
        let raw: Vec<RawRollerRow> = super::read_csv_file(path)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: Vec<RawRollerRow>) -> Self {
        let total = raw.len();
        let records: Vec<RollerRecord> = raw.into_iter().filter_map(RawRollerRow::into_record).collect();
        if records.len() < total {
            tracing::warn!(dropped = total - records.len(), "roller catalog rows without dw/lw dropped");
        }
        Self::from_records(records)
    }

    /// Rows in selection order
    pub fn rows(&self) -> &[RollerRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Built-in roller catalog
pub(crate) fn builtin() -> RollerCatalog {
    RollerCatalog::from_csv_str(include_str!("../../data/roller_catalog.csv")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "built-in roller catalog failed to parse");
        RollerCatalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_sorted_for_selection() {
        let catalog = RollerCatalog::from_csv_str(
            "dw,lw,r_min,r_max,mass_per_100\n20,28,0.5,1.1,6.9\n40,60,1.0,2.0,59.2\n20,30,0.5,1.1,7.4\n",
        )
        .unwrap();
        let dims: Vec<(f64, f64)> = catalog.rows().iter().map(|r| (r.dw_mm, r.lw_mm)).collect();
        assert_eq!(dims, vec![(40.0, 60.0), (20.0, 30.0), (20.0, 28.0)]);
    }

    #[test]
    fn test_rows_missing_dimensions_dropped() {
        let catalog = RollerCatalog::from_csv_str(
            "dw,lw,r_min,r_max,mass_per_100\n,28,0.5,1.1,6.9\n20,,0.5,1.1,6.9\n22,32,,,\n",
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        let row = catalog.rows()[0];
        assert_eq!(row.dw_mm, 22.0);
        assert_eq!(row.r_max_mm, 0.0);
        assert_eq!(row.mass_per_100, 0.0);
    }

    #[test]
    fn test_non_numeric_dimension_dropped() {
        let catalog = RollerCatalog::from_csv_str("dw,lw\nabc,10\n12,16\n").unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = builtin();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.rows().first().map(|r| r.dw_mm), Some(50.0));
        assert_eq!(catalog.rows().last().map(|r| r.dw_mm), Some(10.0));
    }
}
