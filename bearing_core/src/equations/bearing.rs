//! # Roller Bearing Formulas
//!
//! Closed-form formulas for the internal geometry and load ratings of
//! radial cylindrical roller bearings. Every function here is a pure
//! expression; input validation happens in [`crate::calculations`].
//!
//! ## Notation
//!
//! - `d` = bore diameter, `D` = outer diameter (mm)
//! - `Dpw` = pitch diameter of the roller set (mm)
//! - `F` = race-groove clearance (mm)
//! - `Dw`, `Lw` = roller diameter and length (mm)
//! - `Lwe` = effective roller length (mm)
//! - `Z` = rollers per row, `i` = number of rows
//! - `fc` = ISO 281 geometry factor, `bm` = material factor
//!
//! ## References
//!
//! - ISO 281:2007 Rolling bearings - Dynamic load ratings and rating life
//! - ISO 76:2006 Rolling bearings - Static load ratings

use std::f64::consts::PI;

// =============================================================================
// INTERNAL GEOMETRY
// =============================================================================

/// Pitch diameter of the roller set
///
/// # Formula
/// Dpw = (d + D) / 2
///
/// # Example
/// ```rust
/// use bearing_core::equations::bearing::pitch_diameter;
///
/// assert_eq!(pitch_diameter(180.0, 250.0), 215.0);
/// ```
#[inline]
pub fn pitch_diameter(d: f64, outer_d: f64) -> f64 {
    (d + outer_d) / 2.0
}

/// Largest roller diameter that fits the radial space left by the race grooves
///
/// # Formula
/// Dw_max = 2 (Dpw/2 - F/2) = Dpw - F
#[inline]
pub fn max_roller_diameter(pitch: f64, race_groove_f: f64) -> f64 {
    2.0 * (pitch / 2.0 - race_groove_f / 2.0)
}

/// Max roller diameter reduced by an assembly clearance margin
///
/// # Formula
/// Dw_adj = Dw_max - m · Dpw
///
/// Only used to filter the roller catalog; the roller count keeps the
/// unadjusted diameter.
#[inline]
pub fn adjusted_max_roller_diameter(max_dw: f64, pitch: f64, margin: f64) -> f64 {
    max_dw - margin * pitch
}

/// Number of rollers of diameter `max_dw` that fit around the pitch circle
///
/// # Formula
/// Z = floor(π / asin(Dw_max / Dpw))
///
/// Returns `None` unless 0 < Dw_max / Dpw < 1, where the arcsine is defined
/// and the count is positive. The count is left as `f64`: a tiny ratio
/// yields values far beyond any integer type.
///
/// # Example
/// ```rust
/// use bearing_core::equations::bearing::roller_count;
///
/// assert_eq!(roller_count(305.0, 335.0), Some(2.0));
/// assert_eq!(roller_count(335.0, 335.0), None);
/// ```
pub fn roller_count(max_dw: f64, pitch: f64) -> Option<f64> {
    let ratio = max_dw / pitch;
    if !(ratio > 0.0 && ratio < 1.0) {
        return None;
    }
    Some((PI / ratio.asin()).floor())
}

// =============================================================================
// ROLLER SIZING
// =============================================================================

/// Corner radius applied to a catalog roller
///
/// # Formula
/// r = k · r_max   (k = 0.75 by default)
#[inline]
pub fn corner_radius(r_max: f64, factor: f64) -> f64 {
    factor * r_max
}

/// Effective roller length net of the corner-radius relief at both ends
///
/// # Formula
/// Lwe = Lw - 2r
#[inline]
pub fn effective_roller_length(lw: f64, r: f64) -> f64 {
    lw - 2.0 * r
}

/// Mass estimate for 100 solid steel rollers
///
/// # Formula
/// m_100 = π (Dw/2)² · Lw · ρ · 100, rounded to 3 decimals
///
/// With ρ in g/mm³ the result is in grams.
///
/// # Example
/// ```rust
/// use bearing_core::equations::bearing::roller_mass_per_100;
///
/// // 10 x 10 mm roller: 785.398 mm³ · 7.85e-3 · 100
/// assert_eq!(roller_mass_per_100(10.0, 10.0, 7.85e-3), 616.538);
/// ```
pub fn roller_mass_per_100(dw: f64, lw: f64, density: f64) -> f64 {
    let volume = PI * (dw / 2.0).powi(2) * lw;
    round_to(volume * density * 100.0, 3)
}

// =============================================================================
// LOAD RATINGS
// =============================================================================

/// Basic dynamic radial load rating for roller bearings (α = 0°)
///
/// # Formula
/// Cr = bm · fc · (i · Lwe)^(7/9) · Z^(3/4) · Dw^(29/27)
///
/// Lengths in mm give Cr in N.
pub fn dynamic_load_rating(bm: f64, fc: f64, rows: u32, lwe: f64, z: u32, dw: f64) -> f64 {
    bm * fc
        * (rows as f64 * lwe).powf(7.0 / 9.0)
        * (z as f64).powf(3.0 / 4.0)
        * dw.powf(29.0 / 27.0)
}

/// Basic static radial load rating for roller bearings (α = 0°)
///
/// # Formula
/// Cor = k · (1 - Dw/Dpw) · i · Z · Lwe · Dw   (k = 44)
pub fn static_load_rating(k: f64, dw: f64, pitch: f64, rows: u32, z: u32, lwe: f64) -> f64 {
    k * (1.0 - dw / pitch) * rows as f64 * z as f64 * lwe * dw
}

// =============================================================================
// RATING LIFE
// =============================================================================

/// Basic rating life in millions of revolutions for roller bearings
///
/// # Formula
/// L10 = (C / P)^(10/3)
#[inline]
pub fn rating_life_mrev(c: f64, p: f64) -> f64 {
    (c / p).powf(10.0 / 3.0)
}

/// Basic rating life in operating hours at constant speed
///
/// # Formula
/// L10h = 10⁶ · L10 / (60 · n)
#[inline]
pub fn rating_life_hours(l10_mrev: f64, rpm: f64) -> f64 {
    1.0e6 * l10_mrev / (60.0 * rpm)
}

/// Static safety factor
///
/// # Formula
/// s0 = C0 / P0
#[inline]
pub fn static_safety_factor(c0: f64, p0: f64) -> f64 {
    c0 / p0
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
