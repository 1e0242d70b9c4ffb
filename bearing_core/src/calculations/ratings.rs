//! # Load Ratings
//!
//! Basic dynamic (Cr) and static (Cor) radial load ratings for the selected
//! roller set, per ISO 281 and ISO 76 with a zero contact angle.
//!
//! The fc factor is interpolated from the [`FcTable`] at Dw / Dpw, clamped
//! to the tabulated range.

use serde::{Deserialize, Serialize};

use crate::calculations::roller::SelectedRoller;
use crate::equations::bearing;
use crate::errors::{CalcError, CalcResult, Stage};
use crate::settings::EngineSettings;
use crate::tables::FcTable;
use crate::units::{KiloNewtons, Newtons};

/// Load ratings for one roller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadRatings {
    /// Basic dynamic radial load rating Cr (N)
    pub cr_n: f64,
    /// Basic static radial load rating Cor (N)
    pub cor_n: f64,
    /// Interpolated fc factor
    pub fc: f64,
    /// Dw / Dpw after clamping to the fc table
    pub ratio: f64,
    /// True when Dw / Dpw fell outside the fc table
    pub ratio_clamped: bool,
}

impl LoadRatings {
    pub fn cr_kn(&self) -> KiloNewtons {
        Newtons(self.cr_n).into()
    }

    pub fn cor_kn(&self) -> KiloNewtons {
        Newtons(self.cor_n).into()
    }
}

/// Compute Cr and Cor for `rows` rows of `z` rollers on pitch diameter `pitch`.
///
/// # Errors
///
/// - `GeometryInfeasible` when the effective roller length is not positive
/// - `LookupFailed` when the fc table is empty
///
/// # Example
///
/// ```rust
/// use bearing_core::calculations::ratings::compute_ratings;
/// use bearing_core::calculations::roller::{custom_roller, CustomRoller};
/// use bearing_core::settings::EngineSettings;
/// use bearing_core::tables::LookupTables;
///
/// let settings = EngineSettings::default();
/// let roller = custom_roller(&CustomRoller { dw_mm: 16.0, lw_mm: 24.0 }, &settings).unwrap();
/// let ratings = compute_ratings(&roller, 215.0, 32, 4, &LookupTables::builtin().fc, &settings).unwrap();
/// assert!(ratings.cr_n > 0.0 && ratings.cor_n > 0.0);
/// ```
pub fn compute_ratings(
    roller: &SelectedRoller,
    pitch: f64,
    z: u32,
    rows: u32,
    fc_table: &FcTable,
    settings: &EngineSettings,
) -> CalcResult<LoadRatings> {
    let lwe = roller.effective_length_mm;
    if lwe <= 0.0 {
        return Err(CalcError::geometry_infeasible(
            Stage::LoadRating,
            format!(
                "effective roller length {:.3} mm is not positive (Lw = {} mm, r = {:.3} mm)",
                lwe, roller.record.lw_mm, roller.corner_radius_mm
            ),
        ));
    }

    let dw = roller.record.dw_mm;
    let lookup = fc_table.fc_at(dw / pitch)?;
    if lookup.clamped {
        tracing::debug!(requested = dw / pitch, used = lookup.ratio, "fc ratio clamped to table range");
    }

    let cr_n = bearing::dynamic_load_rating(settings.material_factor_bm, lookup.fc, rows, lwe, z, dw);
    let cor_n = bearing::static_load_rating(settings.static_rating_constant, dw, pitch, rows, z, lwe);

    tracing::debug!(cr_n, cor_n, fc = lookup.fc, "load ratings computed");

    Ok(LoadRatings {
        cr_n,
        cor_n,
        fc: lookup.fc,
        ratio: lookup.ratio,
        ratio_clamped: lookup.clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::roller::{RollerSource, SelectedRoller};
    use crate::tables::{LookupTables, RollerRecord};

    fn catalog_roller(dw: f64, lw: f64, r_max: f64) -> SelectedRoller {
        let record = RollerRecord {
            dw_mm: dw,
            lw_mm: lw,
            r_min_mm: 0.0,
            r_max_mm: r_max,
            mass_per_100: 0.0,
        };
        SelectedRoller::from_record(record, RollerSource::Catalog, &EngineSettings::default())
    }

    #[test]
    fn test_narrow_section_scenario() {
        // Dpw = 335, Z = 2, 4 rows of 40 x 60 rollers with r_max = 2
        let roller = catalog_roller(40.0, 60.0, 2.0);
        assert_eq!(roller.effective_length_mm, 57.0);

        let ratings = compute_ratings(&roller, 335.0, 2, 4, &LookupTables::builtin().fc, &EngineSettings::default())
            .unwrap();

        // 40/335 = 0.1194 between 0.11 (85.4) and 0.12 (86.4)
        assert!((ratings.ratio - 40.0 / 335.0).abs() < 1e-12);
        assert!((ratings.fc - 86.3403).abs() < 1e-4);
        assert!(!ratings.ratio_clamped);
        assert!((ratings.cr_n - 572_874.056).abs() < 0.01);
        assert!((ratings.cor_n - 706_731.94).abs() < 0.01);
        assert!((ratings.cr_kn().0 - 572.874).abs() < 1e-3);
    }

    #[test]
    fn test_typical_design_ratings() {
        // 180 x 250: Dpw = 215, Z = 32, roller 16 x 24 (r_max 1.1)
        let roller = catalog_roller(16.0, 24.0, 1.1);
        let ratings = compute_ratings(&roller, 215.0, 32, 4, &LookupTables::builtin().fc, &EngineSettings::default())
            .unwrap();
        assert!((ratings.fc - 80.0837).abs() < 1e-4);
        assert!((ratings.cr_n - 767_044.26).abs() < 0.1);
        assert!((ratings.cor_n - 1_864_123.89).abs() < 0.1);
    }

    #[test]
    fn test_clamped_ratio_uses_boundary_fc() {
        // 120/335 = 0.358 is above the table
        let roller = catalog_roller(120.0, 150.0, 2.0);
        let ratings = compute_ratings(&roller, 335.0, 2, 1, &LookupTables::builtin().fc, &EngineSettings::default())
            .unwrap();
        assert!(ratings.ratio_clamped);
        assert_eq!(ratings.fc, 83.8);
        assert_eq!(ratings.ratio, 0.30);
    }

    #[test]
    fn test_non_positive_effective_length() {
        // r = 1.5, Lwe = 3 - 3 = 0
        let roller = catalog_roller(10.0, 3.0, 2.0);
        let err = compute_ratings(&roller, 200.0, 20, 4, &LookupTables::builtin().fc, &EngineSettings::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_INFEASIBLE");
        assert_eq!(err.stage(), Stage::LoadRating);
    }

    #[test]
    fn test_empty_fc_table() {
        let roller = catalog_roller(16.0, 24.0, 1.1);
        let err = compute_ratings(&roller, 215.0, 32, 4, &FcTable::default(), &EngineSettings::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "LOOKUP_FAILED");
        assert_eq!(err.stage(), Stage::LoadRating);
    }

    #[test]
    fn test_rows_scale_static_rating_linearly() {
        let roller = catalog_roller(16.0, 24.0, 1.1);
        let fc = &LookupTables::builtin().fc;
        let settings = EngineSettings::default();
        let one = compute_ratings(&roller, 215.0, 32, 1, fc, &settings).unwrap();
        let four = compute_ratings(&roller, 215.0, 32, 4, fc, &settings).unwrap();
        assert!((four.cor_n / one.cor_n - 4.0).abs() < 1e-12);
    }
}
