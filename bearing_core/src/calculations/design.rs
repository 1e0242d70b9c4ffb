//! # Bearing Design Pipeline
//!
//! Sizes a four-row cylindrical roller bearing from its boundary dimensions
//! and operating loads in one call:
//!
//! 1. validate the input
//! 2. race-groove clearance F (override or table lookup)
//! 3. internal geometry (Dpw, Dw_max, Z, Dw_adj)
//! 4. roller (custom if supplied, else catalog selection)
//! 5. load ratings Cr / Cor and the rating life check
//! 6. reference catalog record for a given designation
//!
//! A catalog miss ([`RollerSelection::NoFit`]) is not an error: the result
//! comes back without ratings so the caller can supply a custom roller.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::calculations::design::{calculate, DesignInput, OperatingInput};
//! use bearing_core::calculations::geometry::GeometryInput;
//! use bearing_core::settings::EngineSettings;
//! use bearing_core::tables::LookupTables;
//!
//! let input = DesignInput::new(
//!     "Mill roll neck",
//!     GeometryInput { d_mm: 180.0, outer_d_mm: 250.0, b_mm: 160.0 },
//!     OperatingInput { radial_load_kn: 400.0, axial_load_kn: 0.0, rpm: 500.0, rows: 4 },
//! );
//!
//! let result = calculate(&input, LookupTables::builtin(), &EngineSettings::default()).unwrap();
//! assert_eq!(result.derived.roller_count, 32);
//! println!("Cr = {:.0} N", result.ratings.unwrap().cr_n);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::geometry::{resolve_geometry, DerivedGeometry, GeometryInput};
use crate::calculations::life::{rating_life, RatingLife, ServiceConditions};
use crate::calculations::race_groove::{find_race_groove_f, InterpolationMethod, RaceGrooveLookup};
use crate::calculations::ratings::{compute_ratings, LoadRatings};
use crate::calculations::roller::{custom_roller, select_roller, CustomRoller, RollerSelection, RollerSource};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::settings::EngineSettings;
use crate::tables::{BearingRecord, LookupTables};

/// Maximum number of roller rows accepted
const MAX_ROWS: u32 = 8;

/// Operating loads and speed.
///
/// ## JSON Example
///
/// ```json
/// { "radial_load_kn": 400.0, "axial_load_kn": 50.0, "rpm": 500.0, "rows": 4 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingInput {
    /// Radial load Fr (kN)
    pub radial_load_kn: f64,
    /// Axial load Fa (kN)
    #[serde(default)]
    pub axial_load_kn: f64,
    /// Rotational speed (rpm)
    #[serde(default)]
    pub rpm: f64,
    /// Number of roller rows i
    pub rows: u32,
}

impl OperatingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.radial_load_kn.is_finite() || self.radial_load_kn < 0.0 {
            return Err(CalcError::invalid_input(
                "radial_load_kn",
                self.radial_load_kn.to_string(),
                "Radial load cannot be negative",
            ));
        }
        if !self.axial_load_kn.is_finite() || self.axial_load_kn < 0.0 {
            return Err(CalcError::invalid_input(
                "axial_load_kn",
                self.axial_load_kn.to_string(),
                "Axial load cannot be negative",
            ));
        }
        if !self.rpm.is_finite() || self.rpm < 0.0 {
            return Err(CalcError::invalid_input(
                "rpm",
                self.rpm.to_string(),
                "Speed cannot be negative",
            ));
        }
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(CalcError::invalid_input(
                "rows",
                self.rows.to_string(),
                format!("Row count must be between 1 and {}", MAX_ROWS),
            ));
        }
        Ok(())
    }
}

/// Everything needed for one bearing design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Mill roll neck",
///   "geometry": { "d_mm": 180.0, "outer_d_mm": 250.0, "b_mm": 160.0 },
///   "operating": { "radial_load_kn": 400.0, "axial_load_kn": 50.0, "rpm": 500.0, "rows": 4 },
///   "designation": "180RV2501",
///   "service": { "life_hours": 20000.0, "mounting": "Fixed" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// User label for this design
    #[serde(default)]
    pub label: String,
    pub geometry: GeometryInput,
    pub operating: OperatingInput,
    /// Race-groove clearance F to use instead of the table (mm)
    #[serde(default)]
    pub race_groove_override: Option<f64>,
    /// Roller size to use instead of the catalog
    #[serde(default)]
    pub custom_roller: Option<CustomRoller>,
    /// Pick the catalog candidate with this length instead of the longest (mm)
    #[serde(default)]
    pub preferred_roller_length: Option<f64>,
    /// Catalog designation to compare against
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub service: ServiceConditions,
}

impl DesignInput {
    pub fn new(label: impl Into<String>, geometry: GeometryInput, operating: OperatingInput) -> Self {
        DesignInput {
            label: label.into(),
            geometry,
            operating,
            race_groove_override: None,
            custom_roller: None,
            preferred_roller_length: None,
            designation: None,
            service: ServiceConditions::default(),
        }
    }

    pub fn with_race_groove_override(mut self, f_mm: f64) -> Self {
        self.race_groove_override = Some(f_mm);
        self
    }

    pub fn with_custom_roller(mut self, roller: CustomRoller) -> Self {
        self.custom_roller = Some(roller);
        self
    }

    pub fn with_preferred_roller_length(mut self, lw_mm: f64) -> Self {
        self.preferred_roller_length = Some(lw_mm);
        self
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    pub fn with_service(mut self, service: ServiceConditions) -> Self {
        self.service = service;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.geometry.validate()?;
        self.operating.validate()?;
        if let Some(f) = self.race_groove_override {
            if !f.is_finite() {
                return Err(CalcError::invalid_input(
                    "race_groove_override",
                    f.to_string(),
                    "Race-groove clearance must be finite",
                ));
            }
        }
        if let Some(custom) = &self.custom_roller {
            custom.validate()?;
        }
        if let Some(lw) = self.preferred_roller_length {
            if !lw.is_finite() || lw <= 0.0 {
                return Err(CalcError::invalid_input(
                    "preferred_roller_length",
                    lw.to_string(),
                    "Roller length must be positive",
                ));
            }
        }
        self.service.validate()
    }
}

/// Complete design result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub label: String,
    pub geometry: GeometryInput,
    pub operating: OperatingInput,
    /// Race-groove clearance and how it was obtained
    pub race_groove: RaceGrooveLookup,
    pub derived: DerivedGeometry,
    pub selection: RollerSelection,
    /// Present whenever a roller was selected
    pub ratings: Option<LoadRatings>,
    pub life: Option<RatingLife>,
    /// Catalog record for the requested designation
    pub reference_bearing: Option<BearingRecord>,
    pub service: ServiceConditions,
    /// Equations applied, in order
    pub equations: EquationTracker,
}

impl DesignResult {
    /// True when a roller was found and rated
    pub fn is_complete(&self) -> bool {
        self.ratings.is_some()
    }

    /// Computed Cr relative to the catalog Cr of the reference bearing
    pub fn cr_vs_catalog(&self) -> Option<f64> {
        let catalog_kn = self.reference_bearing.as_ref()?.catalog_cr_kn?;
        let ratings = self.ratings?;
        (catalog_kn > 0.0).then(|| ratings.cr_kn().0 / catalog_kn)
    }
}

/// Boundary dimensions of a catalogued bearing.
///
/// # Errors
///
/// `LookupFailed` when the designation is not in the catalog.
pub fn prefill_geometry(designation: &str, tables: &LookupTables) -> CalcResult<GeometryInput> {
    Ok(tables.bearings.lookup(designation)?.geometry())
}

/// Run the design pipeline for `input`.
///
/// # Errors
///
/// - `InvalidInput` when the input violates a constraint or the preferred
///   roller length names no candidate
/// - `LookupFailed` when a required table is empty
/// - `GeometryInfeasible` when the envelope cannot hold a roller set
pub fn calculate(input: &DesignInput, tables: &LookupTables, settings: &EngineSettings) -> CalcResult<DesignResult> {
    let _span = tracing::info_span!("design", label = %input.label).entered();
    input.validate()?;

    let mut equations = EquationTracker::new();
    let g = &input.geometry;

    // Race-groove clearance
    let race_groove = match input.race_groove_override {
        Some(f) => RaceGrooveLookup::overridden(f),
        None => find_race_groove_f(g.d_mm, g.outer_d_mm, &tables.race_groove, settings.interpolation_epsilon)?,
    };
    if race_groove.method == InterpolationMethod::BilinearInterpolated {
        equations.record(Equation::RaceGrooveBlend, format!("d = {} mm, D = {} mm", g.d_mm, g.outer_d_mm));
    }

    // Internal geometry
    let derived = resolve_geometry(g.d_mm, g.outer_d_mm, race_groove.f_mm, settings)?;
    equations.record(Equation::PitchDiameter, format!("Dpw = {:.2} mm", derived.pitch_diameter_mm));
    equations.record(Equation::MaxRollerDiameter, format!("F = {:.3} mm", race_groove.f_mm));
    equations.record(Equation::RollerCount, format!("Z = {}", derived.roller_count));
    equations.record(
        Equation::AdjustedMaxRollerDiameter,
        format!("margin = {}", settings.clearance_margin),
    );

    // Roller
    let selection = match &input.custom_roller {
        Some(custom) => {
            if input.preferred_roller_length.is_some() {
                tracing::warn!("custom roller supplied; preferred catalog length ignored");
            }
            let roller = custom_roller(custom, settings)?;
            equations.record(Equation::CustomRollerMass, roller.record.to_string());
            RollerSelection::Selected {
                roller,
                candidates: Vec::new(),
            }
        }
        None => {
            let selection = select_roller(
                &tables.rollers,
                derived.adjusted_max_roller_diameter_mm,
                g.b_mm,
                settings,
            );
            match input.preferred_roller_length {
                Some(lw) => selection.with_preferred_length(lw, settings)?,
                None => selection,
            }
        }
    };

    // Ratings and life
    let (ratings, life) = match selection.selected() {
        Some(roller) => {
            let context = match roller.source {
                RollerSource::Catalog => format!("catalog roller {}", roller.record),
                RollerSource::Custom => format!("custom roller {}", roller.record),
            };
            if roller.source == RollerSource::Catalog {
                equations.record(Equation::CornerRadius, context.clone());
            }
            equations.record(Equation::EffectiveRollerLength, context.clone());

            let ratings = compute_ratings(
                roller,
                derived.pitch_diameter_mm,
                derived.roller_count,
                input.operating.rows,
                &tables.fc,
                settings,
            )?;
            equations.record(Equation::FcInterpolation, format!("Dw/Dpw = {:.4}", ratings.ratio));
            equations.record(Equation::DynamicLoadRating, context.clone());
            equations.record(Equation::StaticLoadRating, context);

            let life = rating_life(&ratings, &input.operating, &input.service);
            equations.record(Equation::EquivalentLoad, format!("Fr = {} kN", input.operating.radial_load_kn));
            if life.l10_mrev.is_some() {
                equations.record(Equation::RatingLifeRevolutions, "basic rating life");
            }
            if life.l10h_hours.is_some() {
                equations.record(Equation::RatingLifeHours, format!("n = {} rpm", input.operating.rpm));
            }
            if life.static_safety_factor.is_some() {
                equations.record(Equation::StaticSafetyFactor, "static check");
            }
            (Some(ratings), Some(life))
        }
        None => (None, None),
    };

    // Reference bearing (display only)
    let reference_bearing = match &input.designation {
        Some(designation) => match tables.bearings.lookup(designation) {
            Ok(record) => Some(record.clone()),
            Err(e) => {
                tracing::warn!(error = %e, "reference bearing not attached");
                None
            }
        },
        None => None,
    };

    tracing::info!(
        f_mm = race_groove.f_mm,
        f_method = %race_groove.method,
        roller_count = derived.roller_count,
        fit = selection.is_fit(),
        cr_n = ?ratings.map(|r| r.cr_n),
        "design complete"
    );

    Ok(DesignResult {
        label: input.label.clone(),
        geometry: input.geometry,
        operating: input.operating,
        race_groove,
        derived,
        selection,
        ratings,
        life,
        reference_bearing,
        service: input.service,
        equations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical_input() -> DesignInput {
        DesignInput::new(
            "Roll neck",
            GeometryInput {
                d_mm: 180.0,
                outer_d_mm: 250.0,
                b_mm: 160.0,
            },
            OperatingInput {
                radial_load_kn: 500.0,
                axial_load_kn: 0.0,
                rpm: 300.0,
                rows: 4,
            },
        )
    }

    fn run(input: &DesignInput) -> CalcResult<DesignResult> {
        calculate(input, LookupTables::builtin(), &EngineSettings::default())
    }

    #[test]
    fn test_typical_design() {
        let result = run(&typical_input()).unwrap();

        assert_eq!(result.race_groove.f_mm, 194.0);
        assert_eq!(result.race_groove.method, InterpolationMethod::ExactMatch);
        assert_eq!(result.derived.pitch_diameter_mm, 215.0);
        assert_eq!(result.derived.max_roller_diameter_mm, 21.0);
        assert_eq!(result.derived.roller_count, 32);

        let roller = result.selection.selected().unwrap();
        assert_eq!(roller.record.dw_mm, 16.0);
        assert_eq!(roller.record.lw_mm, 24.0);
        assert!((roller.effective_length_mm - 22.35).abs() < 1e-12);

        let ratings = result.ratings.unwrap();
        assert!((ratings.cr_n - 767_044.26).abs() < 0.1);
        assert!((ratings.cor_n - 1_864_123.89).abs() < 0.1);

        let life = result.life.unwrap();
        assert!((life.l10h_hours.unwrap() - 231.33).abs() < 0.05);
        assert!(result.is_complete());
    }

    #[test]
    fn test_equations_recorded() {
        let result = run(&typical_input()).unwrap();
        let used = result.equations.unique_equations();
        assert!(used.contains(&Equation::RollerCount));
        assert!(used.contains(&Equation::CornerRadius));
        assert!(used.contains(&Equation::DynamicLoadRating));
        assert!(used.contains(&Equation::RatingLifeHours));
        // exact match: no blend
        assert!(!used.contains(&Equation::RaceGrooveBlend));
        assert!(!used.contains(&Equation::CustomRollerMass));
    }

    #[test]
    fn test_idempotent() {
        let input = typical_input().with_designation("180RV2501");
        let first = run(&input).unwrap();
        let second = run(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_fit_is_not_an_error() {
        let mut input = typical_input();
        input.geometry.b_mm = 5.0;
        let result = run(&input).unwrap();
        assert!(!result.selection.is_fit());
        assert!(result.ratings.is_none());
        assert!(result.life.is_none());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_custom_roller_takes_precedence() {
        let input = typical_input().with_custom_roller(CustomRoller { dw_mm: 18.0, lw_mm: 30.0 });
        let result = run(&input).unwrap();
        let roller = result.selection.selected().unwrap();
        assert_eq!(roller.source, RollerSource::Custom);
        assert_eq!(roller.record.dw_mm, 18.0);
        assert!(result.selection.candidates().is_empty());
        assert!(result.equations.unique_equations().contains(&Equation::CustomRollerMass));
    }

    #[test]
    fn test_custom_roller_after_no_fit() {
        let mut input = typical_input().with_custom_roller(CustomRoller { dw_mm: 10.0, lw_mm: 4.0 });
        input.geometry.b_mm = 5.0;
        let result = run(&input).unwrap();
        assert!(result.is_complete());
    }

    #[test]
    fn test_preferred_roller_length() {
        let result = run(&typical_input().with_preferred_roller_length(16.0)).unwrap();
        assert_eq!(result.selection.selected().unwrap().record.lw_mm, 16.0);

        let err = run(&typical_input().with_preferred_roller_length(17.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_race_groove_override() {
        let mut input = typical_input().with_race_groove_override(30.0);
        input.geometry = GeometryInput {
            d_mm: 300.0,
            outer_d_mm: 370.0,
            b_mm: 160.0,
        };
        let result = run(&input).unwrap();
        assert_eq!(result.race_groove.method, InterpolationMethod::Override);
        assert_eq!(result.derived.roller_count, 2);
    }

    #[test]
    fn test_infeasible_override_fails() {
        let err = run(&typical_input().with_race_groove_override(0.0)).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_INFEASIBLE");
    }

    #[test]
    fn test_interpolated_race_groove() {
        let mut input = typical_input();
        input.geometry.d_mm = 190.0;
        input.geometry.outer_d_mm = 265.0;
        let result = run(&input).unwrap();
        assert_eq!(result.race_groove.method, InterpolationMethod::BilinearInterpolated);
        assert!(result.equations.unique_equations().contains(&Equation::RaceGrooveBlend));
    }

    #[test]
    fn test_row_count_validation() {
        for rows in [0, 9] {
            let mut input = typical_input();
            input.operating.rows = rows;
            let err = run(&input).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_negative_load_rejected() {
        let mut input = typical_input();
        input.operating.radial_load_kn = -1.0;
        assert!(run(&input).is_err());
    }

    #[test]
    fn test_reference_bearing() {
        let result = run(&typical_input().with_designation("180RV2501")).unwrap();
        let reference = result.reference_bearing.as_ref().unwrap();
        assert_eq!(reference.catalog_cr_kn, Some(1830.0));
        // 767.04 / 1830
        assert!((result.cr_vs_catalog().unwrap() - 0.41915).abs() < 1e-4);

        let unknown = run(&typical_input().with_designation("UNKNOWN")).unwrap();
        assert!(unknown.reference_bearing.is_none());
    }

    #[test]
    fn test_prefill_geometry() {
        let geometry = prefill_geometry("180RV2501", LookupTables::builtin()).unwrap();
        assert_eq!(geometry, typical_input().geometry);
        assert!(prefill_geometry("NOPE", LookupTables::builtin()).is_err());
    }

    #[test]
    fn test_input_from_json() {
        let json = r#"{
            "geometry": { "d_mm": 180.0, "outer_d_mm": 250.0, "b_mm": 160.0 },
            "operating": { "radial_load_kn": 500.0, "rows": 4 }
        }"#;
        let input: DesignInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.operating.rpm, 0.0);
        assert!(input.custom_roller.is_none());

        let result = run(&input).unwrap();
        assert!(result.life.unwrap().l10h_hours.is_none());
        let out = serde_json::to_string(&result).unwrap();
        assert!(out.contains("\"method\":\"ExactMatch\""));
        assert!(out.contains("\"status\":\"Selected\""));
    }
}
