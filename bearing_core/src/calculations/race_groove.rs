//! # Race-Groove Clearance Lookup
//!
//! Finds the race-groove clearance F for a (d, D) pair from the
//! [`RaceGrooveTable`]:
//!
//! 1. **Exact match** on (inner, outer).
//! 2. **Anchor blend** between the last row with inner ≤ d and outer ≤ D and
//!    the first row with inner ≥ d and outer ≥ D, weighted by the summed
//!    distance along both diameters.
//! 3. **Nearest fallback** by Manhattan distance |inner - d| + |outer - D|
//!    when either anchor is missing. Ties go to the first row in sorted order.
//!
//! The blend is a sum-of-distances weighting, not a true bilinear surface;
//! it is named after the method tag it reports.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, Stage};
use crate::tables::{RaceGrooveRecord, RaceGrooveTable};

/// How the race-groove clearance was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Table row with identical (d, D)
    ExactMatch,
    /// Blend between lower and upper anchors
    BilinearInterpolated,
    /// Closest row by Manhattan distance
    NearestFallback,
    /// Supplied by the caller; table not consulted
    Override,
}

impl InterpolationMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            InterpolationMethod::ExactMatch => "exact match",
            InterpolationMethod::BilinearInterpolated => "interpolated",
            InterpolationMethod::NearestFallback => "nearest fallback",
            InterpolationMethod::Override => "override",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Race-groove clearance and the method that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceGrooveLookup {
    /// Race-groove clearance F (mm)
    pub f_mm: f64,
    pub method: InterpolationMethod,
}

impl RaceGrooveLookup {
    /// Caller-supplied F, passed through unchanged
    pub fn overridden(f_mm: f64) -> Self {
        RaceGrooveLookup {
            f_mm,
            method: InterpolationMethod::Override,
        }
    }
}

/// Look up F for bore `d` and outer diameter `outer_d`.
///
/// # Errors
///
/// `LookupFailed` when the table is empty.
///
/// # Example
///
/// ```rust
/// use bearing_core::calculations::race_groove::{find_race_groove_f, InterpolationMethod};
/// use bearing_core::tables::LookupTables;
///
/// let tables = LookupTables::builtin();
/// let lookup = find_race_groove_f(180.0, 250.0, &tables.race_groove, 1e-6).unwrap();
/// assert_eq!(lookup.f_mm, 194.0);
/// assert_eq!(lookup.method, InterpolationMethod::ExactMatch);
/// ```
pub fn find_race_groove_f(d: f64, outer_d: f64, table: &RaceGrooveTable, epsilon: f64) -> CalcResult<RaceGrooveLookup> {
    let rows = table.rows();
    if rows.is_empty() {
        return Err(CalcError::lookup_failed(Stage::RaceGroove, "race groove", "table is empty"));
    }

    // rows[at_least..at_most] all have inner == d
    let at_most = table.count_inner_at_most(d);
    let at_least = table.first_inner_at_least(d);

    if let Some(row) = rows[at_least..at_most]
        .iter()
        .find(|r| r.outer_diameter_mm == outer_d)
    {
        tracing::debug!(d, outer_d, f = row.f_mm, "race groove exact match");
        return Ok(RaceGrooveLookup {
            f_mm: row.f_mm,
            method: InterpolationMethod::ExactMatch,
        });
    }

    let lower = rows[..at_most].iter().rev().find(|r| r.outer_diameter_mm <= outer_d);
    let upper = rows[at_least..].iter().find(|r| r.outer_diameter_mm >= outer_d);

    if let (Some(lower), Some(upper)) = (lower, upper) {
        let f_mm = blend_anchors(d, outer_d, lower, upper, epsilon);
        tracing::debug!(
            d,
            outer_d,
            f = f_mm,
            lower = ?(lower.inner_diameter_mm, lower.outer_diameter_mm),
            upper = ?(upper.inner_diameter_mm, upper.outer_diameter_mm),
            "race groove interpolated"
        );
        return Ok(RaceGrooveLookup {
            f_mm,
            method: InterpolationMethod::BilinearInterpolated,
        });
    }

    let nearest = nearest_row(d, outer_d, rows)
        .ok_or_else(|| CalcError::lookup_failed(Stage::RaceGroove, "race groove", "table is empty"))?;
    tracing::debug!(
        d,
        outer_d,
        f = nearest.f_mm,
        row = ?(nearest.inner_diameter_mm, nearest.outer_diameter_mm),
        "race groove nearest fallback"
    );
    Ok(RaceGrooveLookup {
        f_mm: nearest.f_mm,
        method: InterpolationMethod::NearestFallback,
    })
}

/// Blend F between two anchors.
///
/// # Formula
/// w = ((d - d_l) + (D - D_l)) / ((d_u - d_l) + (D_u - D_l) + ε)
/// F = F_l + w (F_u - F_l)
pub fn blend_anchors(d: f64, outer_d: f64, lower: &RaceGrooveRecord, upper: &RaceGrooveRecord, epsilon: f64) -> f64 {
    let span = (upper.inner_diameter_mm - lower.inner_diameter_mm)
        + (upper.outer_diameter_mm - lower.outer_diameter_mm)
        + epsilon;
    let w = ((d - lower.inner_diameter_mm) + (outer_d - lower.outer_diameter_mm)) / span;
    lower.f_mm + w * (upper.f_mm - lower.f_mm)
}

fn nearest_row(d: f64, outer_d: f64, rows: &[RaceGrooveRecord]) -> Option<&RaceGrooveRecord> {
    let distance = |r: &RaceGrooveRecord| (r.inner_diameter_mm - d).abs() + (r.outer_diameter_mm - outer_d).abs();
    let mut best: Option<(&RaceGrooveRecord, f64)> = None;
    for row in rows {
        let dist = distance(row);
        // strict: earlier rows win ties
        if best.map_or(true, |(_, b)| dist < b) {
            best = Some((row, dist));
        }
    }
    best.map(|(row, _)| row)
}
