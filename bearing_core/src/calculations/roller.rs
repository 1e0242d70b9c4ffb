//! # Roller Selection
//!
//! Picks the roller for the design from the [`RollerCatalog`]:
//!
//! - keep rows with Dw ≤ Dw_adj and Lw ≤ B
//! - the largest remaining Dw wins; every row with that Dw is a candidate
//! - candidates are ordered Lw descending, then catalog order
//! - the default choice is the first candidate (longest roller)
//!
//! When nothing fits the result is [`RollerSelection::NoFit`]: the caller is
//! expected to supply a custom roller instead. A custom roller gets default
//! corner radii and an estimated mass.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::calculations::roller::select_roller;
//! use bearing_core::settings::EngineSettings;
//! use bearing_core::tables::LookupTables;
//!
//! let tables = LookupTables::builtin();
//! let selection = select_roller(&tables.rollers, 16.7, 160.0, &EngineSettings::default());
//! let roller = selection.selected().unwrap();
//! assert_eq!(roller.record.dw_mm, 16.0);
//! assert_eq!(roller.record.lw_mm, 24.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::bearing;
use crate::errors::{CalcError, CalcResult};
use crate::settings::EngineSettings;
use crate::tables::{RollerCatalog, RollerRecord};

/// Where the selected roller came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollerSource {
    Catalog,
    Custom,
}

/// A roller with its derived corner radius and effective length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedRoller {
    pub record: RollerRecord,
    /// Corner radius r = 0.75 r_max (mm)
    pub corner_radius_mm: f64,
    /// Effective length Lwe = Lw - 2r (mm)
    pub effective_length_mm: f64,
    pub source: RollerSource,
}

impl SelectedRoller {
    /// Derive corner radius and effective length for a roller record.
    pub fn from_record(record: RollerRecord, source: RollerSource, settings: &EngineSettings) -> Self {
        let corner_radius_mm = bearing::corner_radius(record.r_max_mm, settings.corner_radius_factor);
        SelectedRoller {
            record,
            corner_radius_mm,
            effective_length_mm: bearing::effective_roller_length(record.lw_mm, corner_radius_mm),
            source,
        }
    }
}

/// Caller-specified roller size used instead of the catalog.
///
/// ## JSON Example
///
/// ```json
/// { "dw_mm": 40.0, "lw_mm": 60.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomRoller {
    /// Roller diameter Dw (mm)
    pub dw_mm: f64,
    /// Roller length Lw (mm)
    pub lw_mm: f64,
}

impl CustomRoller {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.dw_mm.is_finite() || self.dw_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "custom_roller.dw_mm",
                self.dw_mm.to_string(),
                "Roller diameter must be positive",
            ));
        }
        if !self.lw_mm.is_finite() || self.lw_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "custom_roller.lw_mm",
                self.lw_mm.to_string(),
                "Roller length must be positive",
            ));
        }
        Ok(())
    }
}

/// Outcome of a catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum RollerSelection {
    /// A roller fits; `candidates` holds every catalog row sharing its Dw
    Selected {
        roller: SelectedRoller,
        candidates: Vec<RollerRecord>,
    },
    /// No catalog roller fits the radial and axial space
    NoFit {
        adjusted_max_dw_mm: f64,
        available_width_mm: f64,
    },
}

impl RollerSelection {
    /// The chosen roller, if any
    pub fn selected(&self) -> Option<&SelectedRoller> {
        match self {
            RollerSelection::Selected { roller, .. } => Some(roller),
            RollerSelection::NoFit { .. } => None,
        }
    }

    /// Same-diameter alternatives (empty on NoFit)
    pub fn candidates(&self) -> &[RollerRecord] {
        match self {
            RollerSelection::Selected { candidates, .. } => candidates,
            RollerSelection::NoFit { .. } => &[],
        }
    }

    pub fn is_fit(&self) -> bool {
        matches!(self, RollerSelection::Selected { .. })
    }

    /// Replace the default choice with the candidate of length `lw_mm`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when no candidate has that length (including NoFit).
    pub fn with_preferred_length(self, lw_mm: f64, settings: &EngineSettings) -> CalcResult<Self> {
        let available: Vec<String> = self.candidates().iter().map(|c| c.lw_mm.to_string()).collect();
        match self {
            RollerSelection::Selected { candidates, .. } => {
                let record = candidates.iter().find(|c| c.lw_mm == lw_mm).copied().ok_or_else(|| {
                    CalcError::invalid_input(
                        "preferred_roller_length",
                        lw_mm.to_string(),
                        format!("No candidate roller with this length (available: {})", available.join(", ")),
                    )
                })?;
                Ok(RollerSelection::Selected {
                    roller: SelectedRoller::from_record(record, RollerSource::Catalog, settings),
                    candidates,
                })
            }
            RollerSelection::NoFit { .. } => Err(CalcError::invalid_input(
                "preferred_roller_length",
                lw_mm.to_string(),
                "No catalog roller fits, so there is no candidate to choose",
            )),
        }
    }
}

/// Select a catalog roller for the available radial (`adjusted_max_dw`) and
/// axial (`width`) space.
pub fn select_roller(
    catalog: &RollerCatalog,
    adjusted_max_dw: f64,
    width: f64,
    settings: &EngineSettings,
) -> RollerSelection {
    let mut fitting = catalog
        .rows()
        .iter()
        .filter(|r| r.dw_mm <= adjusted_max_dw && r.lw_mm <= width);

    // rows are held Dw desc, Lw desc: the first fit carries the top Dw
    let Some(first) = fitting.next().copied() else {
        tracing::warn!(adjusted_max_dw, width, "no catalog roller fits");
        return RollerSelection::NoFit {
            adjusted_max_dw_mm: adjusted_max_dw,
            available_width_mm: width,
        };
    };

    let mut candidates = vec![first];
    candidates.extend(fitting.filter(|r| r.dw_mm == first.dw_mm).copied());

    tracing::debug!(
        dw = first.dw_mm,
        lw = first.lw_mm,
        candidates = candidates.len(),
        "catalog roller selected"
    );

    RollerSelection::Selected {
        roller: SelectedRoller::from_record(first, RollerSource::Catalog, settings),
        candidates,
    }
}

/// Build a roller from caller-supplied dimensions.
///
/// Corner radii default to the configured custom values (0.2 / 0.6 mm) and
/// the mass of 100 rollers is estimated from a solid steel cylinder.
pub fn custom_roller(custom: &CustomRoller, settings: &EngineSettings) -> CalcResult<SelectedRoller> {
    custom.validate()?;
    let record = RollerRecord {
        dw_mm: custom.dw_mm,
        lw_mm: custom.lw_mm,
        r_min_mm: settings.custom_r_min_mm,
        r_max_mm: settings.custom_r_max_mm,
        mass_per_100: bearing::roller_mass_per_100(custom.dw_mm, custom.lw_mm, settings.steel_density),
    };
    tracing::debug!(dw = record.dw_mm, lw = record.lw_mm, mass_per_100 = record.mass_per_100, "custom roller");
    Ok(SelectedRoller::from_record(record, RollerSource::Custom, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::LookupTables;

    fn roller(dw: f64, lw: f64, mass: f64) -> RollerRecord {
        RollerRecord {
            dw_mm: dw,
            lw_mm: lw,
            r_min_mm: 0.5,
            r_max_mm: 1.1,
            mass_per_100: mass,
        }
    }

    #[test]
    fn test_builtin_selection() {
        let settings = EngineSettings::default();
        let selection = select_roller(&LookupTables::builtin().rollers, 16.7, 160.0, &settings);
        let selected = selection.selected().unwrap();
        assert_eq!(selected.record.dw_mm, 16.0);
        assert_eq!(selected.record.lw_mm, 24.0);
        assert_eq!(selected.source, RollerSource::Catalog);
        assert!((selected.corner_radius_mm - 0.825).abs() < 1e-12);
        assert!((selected.effective_length_mm - 22.35).abs() < 1e-12);

        let lengths: Vec<f64> = selection.candidates().iter().map(|c| c.lw_mm).collect();
        assert_eq!(lengths, vec![24.0, 16.0]);
    }

    #[test]
    fn test_tie_break_prefers_longer_roller() {
        let catalog = RollerCatalog::from_records(vec![
            roller(20.0, 28.0, 1.0),
            roller(18.0, 40.0, 2.0),
            roller(20.0, 30.0, 3.0),
            roller(20.0, 30.0, 4.0),
        ]);
        let selection = select_roller(&catalog, 25.0, 100.0, &EngineSettings::default());
        let selected = selection.selected().unwrap();
        assert_eq!(selected.record.lw_mm, 30.0);
        // identical sizes keep catalog order
        assert_eq!(selected.record.mass_per_100, 3.0);

        let masses: Vec<f64> = selection.candidates().iter().map(|c| c.mass_per_100).collect();
        assert_eq!(masses, vec![3.0, 4.0, 1.0]);
    }

    #[test]
    fn test_width_limits_length() {
        let catalog = RollerCatalog::from_records(vec![roller(20.0, 28.0, 1.0), roller(20.0, 30.0, 2.0)]);
        let selection = select_roller(&catalog, 25.0, 29.0, &EngineSettings::default());
        assert_eq!(selection.selected().unwrap().record.lw_mm, 28.0);
        assert_eq!(selection.candidates().len(), 1);
    }

    #[test]
    fn test_no_fit() {
        let catalog = LookupTables::builtin().rollers.clone();
        let selection = select_roller(&catalog, 5.0, 160.0, &EngineSettings::default());
        assert!(!selection.is_fit());
        assert!(selection.selected().is_none());
        assert!(selection.candidates().is_empty());
        assert_eq!(
            selection,
            RollerSelection::NoFit {
                adjusted_max_dw_mm: 5.0,
                available_width_mm: 160.0
            }
        );

        let narrow = select_roller(&catalog, 50.0, 5.0, &EngineSettings::default());
        assert!(!narrow.is_fit());
    }

    #[test]
    fn test_preferred_length() {
        let settings = EngineSettings::default();
        let selection = select_roller(&LookupTables::builtin().rollers, 16.7, 160.0, &settings);
        let chosen = selection.clone().with_preferred_length(16.0, &settings).unwrap();
        let roller = chosen.selected().unwrap();
        assert_eq!(roller.record.lw_mm, 16.0);
        assert!((roller.effective_length_mm - 14.35).abs() < 1e-12);
        assert_eq!(chosen.candidates(), selection.candidates());

        let err = selection.with_preferred_length(99.0, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_preferred_length_on_no_fit() {
        let selection = RollerSelection::NoFit {
            adjusted_max_dw_mm: 1.0,
            available_width_mm: 1.0,
        };
        assert!(selection.with_preferred_length(10.0, &EngineSettings::default()).is_err());
    }

    #[test]
    fn test_custom_roller_defaults() {
        let settings = EngineSettings::default();
        let roller = custom_roller(&CustomRoller { dw_mm: 40.0, lw_mm: 60.0 }, &settings).unwrap();
        assert_eq!(roller.source, RollerSource::Custom);
        assert_eq!(roller.record.r_min_mm, 0.2);
        assert_eq!(roller.record.r_max_mm, 0.6);
        assert_eq!(roller.record.mass_per_100, 59187.606);
        assert!((roller.corner_radius_mm - 0.45).abs() < 1e-12);
        assert!((roller.effective_length_mm - 59.1).abs() < 1e-12);
    }

    #[test]
    fn test_custom_roller_rejects_non_positive() {
        let settings = EngineSettings::default();
        assert!(custom_roller(&CustomRoller { dw_mm: 0.0, lw_mm: 60.0 }, &settings).is_err());
        assert!(custom_roller(&CustomRoller { dw_mm: 40.0, lw_mm: -1.0 }, &settings).is_err());
    }
}
