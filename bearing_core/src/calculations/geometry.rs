//! # Internal Geometry
//!
//! Derives the roller-set geometry from the boundary dimensions and the
//! race-groove clearance F:
//!
//! - pitch diameter Dpw = (d + D) / 2
//! - maximum roller diameter Dw_max = Dpw - F
//! - rollers per row Z = floor(π / asin(Dw_max / Dpw))
//! - adjusted maximum roller diameter Dw_adj = Dw_max - 2% Dpw
//!
//! The adjusted diameter only filters the roller catalog. Z is always taken
//! from the unadjusted Dw_max.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::calculations::geometry::resolve_geometry;
//! use bearing_core::settings::EngineSettings;
//!
//! let geometry = resolve_geometry(180.0, 250.0, 194.0, &EngineSettings::default()).unwrap();
//! assert_eq!(geometry.pitch_diameter_mm, 215.0);
//! assert_eq!(geometry.max_roller_diameter_mm, 21.0);
//! assert_eq!(geometry.roller_count, 32);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::bearing;
use crate::errors::{CalcError, CalcResult, Stage};
use crate::settings::EngineSettings;

/// Boundary dimensions of the bearing envelope.
///
/// ## JSON Example
///
/// ```json
/// { "d_mm": 180.0, "outer_d_mm": 250.0, "b_mm": 160.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryInput {
    /// Bore diameter d (mm)
    pub d_mm: f64,
    /// Outer diameter D (mm)
    pub outer_d_mm: f64,
    /// Available width B (mm)
    pub b_mm: f64,
}

impl GeometryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.d_mm.is_finite() || self.d_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "d_mm",
                self.d_mm.to_string(),
                "Bore diameter must be positive",
            ));
        }
        if !self.outer_d_mm.is_finite() || self.outer_d_mm <= self.d_mm {
            return Err(CalcError::invalid_input(
                "outer_d_mm",
                self.outer_d_mm.to_string(),
                "Outer diameter must exceed the bore diameter",
            ));
        }
        if !self.b_mm.is_finite() || self.b_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "b_mm",
                self.b_mm.to_string(),
                "Width must be positive",
            ));
        }
        Ok(())
    }
}

/// Geometry derived from (d, D, F).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedGeometry {
    /// Pitch diameter Dpw (mm)
    pub pitch_diameter_mm: f64,
    /// Race-groove clearance F used (mm)
    pub race_groove_f_mm: f64,
    /// Maximum roller diameter Dw_max (mm)
    pub max_roller_diameter_mm: f64,
    /// Dw_max less the clearance margin, used for catalog filtering (mm)
    pub adjusted_max_roller_diameter_mm: f64,
    /// Rollers per row Z
    pub roller_count: u32,
}

/// Resolve the internal geometry for bore `d`, outer diameter `outer_d` and
/// race-groove clearance `f`.
///
/// # Errors
///
/// `GeometryInfeasible` when the race grooves leave no radial space
/// (Dw_max ≤ 0), when Dw_max / Dpw falls outside the arcsine domain, or when
/// the roller count does not fit a `u32`.
pub fn resolve_geometry(d: f64, outer_d: f64, f: f64, settings: &EngineSettings) -> CalcResult<DerivedGeometry> {
    let pitch = bearing::pitch_diameter(d, outer_d);
    let max_dw = bearing::max_roller_diameter(pitch, f);

    if max_dw <= 0.0 {
        return Err(CalcError::geometry_infeasible(
            Stage::Geometry,
            format!(
                "no radial space for rollers: F = {:.3} mm leaves Dw_max = {:.3} mm at Dpw = {:.3} mm",
                f, max_dw, pitch
            ),
        ));
    }

    let count = bearing::roller_count(max_dw, pitch).ok_or_else(|| {
        CalcError::geometry_infeasible(
            Stage::Geometry,
            format!(
                "infeasible roller packing: Dw_max / Dpw = {:.4} (Dw_max = {:.3} mm, Dpw = {:.3} mm)",
                max_dw / pitch,
                max_dw,
                pitch
            ),
        )
    })?;
    if count > f64::from(u32::MAX) {
        return Err(CalcError::geometry_infeasible(
            Stage::Geometry,
            format!(
                "implausible roller packing: Z = {:e} rollers (Dw_max = {:e} mm, Dpw = {:.3} mm)",
                count, max_dw, pitch
            ),
        ));
    }
    let roller_count = count as u32;

    let adjusted = bearing::adjusted_max_roller_diameter(max_dw, pitch, settings.clearance_margin);

    tracing::debug!(
        pitch_diameter = pitch,
        max_roller_diameter = max_dw,
        adjusted_max_roller_diameter = adjusted,
        roller_count,
        "geometry resolved"
    );

    Ok(DerivedGeometry {
        pitch_diameter_mm: pitch,
        race_groove_f_mm: f,
        max_roller_diameter_mm: max_dw,
        adjusted_max_roller_diameter_mm: adjusted,
        roller_count,
    })
}
