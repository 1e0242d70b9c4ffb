//! # Rating Life Check
//!
//! Basic rating life (ISO 281) and static safety factor (ISO 76) of the
//! designed bearing under the operating loads.
//!
//! ## Assumptions
//!
//! - Contact angle 0°: the roller set carries radial load only, so
//!   P = P0 = Fr. A non-zero axial load is flagged, never added to P.
//! - 90% reliability, conventional operating conditions (a1 = a_ISO = 1)
//! - Constant speed
//!
//! Zero radial load means the life is unbounded: L10, L10h and s0 are
//! reported as absent. Zero speed leaves L10h absent.

use serde::{Deserialize, Serialize};

use crate::calculations::design::OperatingInput;
use crate::calculations::ratings::LoadRatings;
use crate::equations::bearing;
use crate::errors::{CalcError, CalcResult};
use crate::units::{KiloNewtons, Newtons};

/// Bearing mounting arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mounting {
    /// Locating bearing
    #[default]
    Fixed,
    /// Non-locating bearing
    Floating,
}

impl Mounting {
    pub fn display_name(&self) -> &'static str {
        match self {
            Mounting::Fixed => "Fixed",
            Mounting::Floating => "Floating",
        }
    }
}

impl std::fmt::Display for Mounting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Operating environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    Clean,
    Dirty,
    Corrosive,
}

impl Environment {
    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Clean => "Clean",
            Environment::Dirty => "Dirty",
            Environment::Corrosive => "Corrosive",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lowest / highest operating temperature accepted (°C)
const MIN_TEMPERATURE_C: f64 = -50.0;
const MAX_TEMPERATURE_C: f64 = 250.0;

/// Optional service conditions.
///
/// Only `life_hours` feeds a calculation; the rest is carried to the result.
///
/// ## JSON Example
///
/// ```json
/// {
///   "life_hours": 20000.0,
///   "temperature_c": 80.0,
///   "mounting": "Fixed",
///   "environment": "Clean"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceConditions {
    /// Required basic rating life (h)
    #[serde(default)]
    pub life_hours: Option<f64>,
    /// Operating temperature (°C)
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub mounting: Option<Mounting>,
    #[serde(default)]
    pub environment: Option<Environment>,
}

impl ServiceConditions {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if let Some(hours) = self.life_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(CalcError::invalid_input(
                    "life_hours",
                    hours.to_string(),
                    "Required life cannot be negative",
                ));
            }
        }
        if let Some(t) = self.temperature_c {
            if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t) {
                return Err(CalcError::invalid_input(
                    "temperature_c",
                    t.to_string(),
                    format!(
                        "Operating temperature must be between {} and {} °C",
                        MIN_TEMPERATURE_C, MAX_TEMPERATURE_C
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Rating life results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingLife {
    /// Equivalent dynamic (and static) load P = P0 = Fr (N)
    pub equivalent_load_n: f64,
    /// Basic rating life L10 (10⁶ revolutions); None when P = 0
    pub l10_mrev: Option<f64>,
    /// Basic rating life L10h (h); None when P = 0 or speed = 0
    pub l10h_hours: Option<f64>,
    /// Static safety factor s0 = Cor / P0; None when P0 = 0
    pub static_safety_factor: Option<f64>,
    /// True when an axial load was given; it is not carried by the rollers
    pub axial_load_ignored: bool,
    /// L10h ≥ required life, when both are known
    pub meets_required_life: Option<bool>,
}

/// Evaluate the rating life for `ratings` under `operating` loads.
///
/// # Example
///
/// ```rust
/// use bearing_core::calculations::design::OperatingInput;
/// use bearing_core::calculations::life::{rating_life, ServiceConditions};
/// use bearing_core::calculations::ratings::LoadRatings;
///
/// let ratings = LoadRatings { cr_n: 2000.0, cor_n: 3000.0, fc: 80.0, ratio: 0.1, ratio_clamped: false };
/// let operating = OperatingInput { radial_load_kn: 1.0, axial_load_kn: 0.0, rpm: 500.0, rows: 4 };
/// let life = rating_life(&ratings, &operating, &ServiceConditions::default());
/// assert_eq!(life.static_safety_factor, Some(3.0));
/// ```
pub fn rating_life(ratings: &LoadRatings, operating: &OperatingInput, service: &ServiceConditions) -> RatingLife {
    let p: Newtons = KiloNewtons(operating.radial_load_kn).into();
    let p = p.0;

    let (l10_mrev, l10h_hours, static_safety_factor) = if p > 0.0 {
        let l10 = bearing::rating_life_mrev(ratings.cr_n, p);
        let l10h = (operating.rpm > 0.0).then(|| bearing::rating_life_hours(l10, operating.rpm));
        (Some(l10), l10h, Some(bearing::static_safety_factor(ratings.cor_n, p)))
    } else {
        (None, None, None)
    };

    let axial_load_ignored = operating.axial_load_kn > 0.0;
    if axial_load_ignored {
        tracing::warn!(
            axial_load_kn = operating.axial_load_kn,
            "axial load is not carried by a cylindrical roller set and was excluded from P"
        );
    }

    // unbounded life (P = 0) satisfies any requirement
    let meets_required_life = service.life_hours.and_then(|required| {
        if p <= 0.0 {
            Some(true)
        } else {
            l10h_hours.map(|l10h| l10h >= required)
        }
    });

    tracing::debug!(
        p_n = p,
        l10_mrev = ?l10_mrev,
        l10h_hours = ?l10h_hours,
        s0 = ?static_safety_factor,
        "rating life evaluated"
    );

    RatingLife {
        equivalent_load_n: p,
        l10_mrev,
        l10h_hours,
        static_safety_factor,
        axial_load_ignored,
        meets_required_life,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(cr: f64, cor: f64) -> LoadRatings {
        LoadRatings {
            cr_n: cr,
            cor_n: cor,
            fc: 80.0,
            ratio: 0.08,
            ratio_clamped: false,
        }
    }

    fn operating(fr: f64, fa: f64, rpm: f64) -> OperatingInput {
        OperatingInput {
            radial_load_kn: fr,
            axial_load_kn: fa,
            rpm,
            rows: 4,
        }
    }

    #[test]
    fn test_life_values() {
        // Cr/P = 2 -> L10 = 2^(10/3)
        let life = rating_life(&ratings(2000.0, 3000.0), &operating(1.0, 0.0, 500.0), &ServiceConditions::default());
        assert_eq!(life.equivalent_load_n, 1000.0);
        let l10 = life.l10_mrev.unwrap();
        assert!((l10 - 10.0794).abs() < 1e-3);
        assert!((life.l10h_hours.unwrap() - l10 * 1.0e6 / 30_000.0).abs() < 1e-9);
        assert_eq!(life.static_safety_factor, Some(3.0));
        assert!(!life.axial_load_ignored);
        assert_eq!(life.meets_required_life, None);
    }

    #[test]
    fn test_typical_design_life() {
        // 180 x 250 design at 500 kN, 300 rpm
        let life = rating_life(
            &ratings(767_044.26, 1_864_123.89),
            &operating(500.0, 50.0, 300.0),
            &ServiceConditions {
                life_hours: Some(20_000.0),
                ..Default::default()
            },
        );
        assert!((life.l10_mrev.unwrap() - 4.1639).abs() < 1e-3);
        assert!((life.l10h_hours.unwrap() - 231.33).abs() < 0.05);
        assert!((life.static_safety_factor.unwrap() - 3.7282).abs() < 1e-3);
        assert!(life.axial_load_ignored);
        assert_eq!(life.meets_required_life, Some(false));
    }

    #[test]
    fn test_axial_load_not_in_equivalent_load() {
        let without = rating_life(&ratings(2000.0, 3000.0), &operating(1.0, 0.0, 500.0), &ServiceConditions::default());
        let with = rating_life(&ratings(2000.0, 3000.0), &operating(1.0, 5.0, 500.0), &ServiceConditions::default());
        assert_eq!(without.equivalent_load_n, with.equivalent_load_n);
        assert_eq!(without.l10_mrev, with.l10_mrev);
        assert!(with.axial_load_ignored);
    }

    #[test]
    fn test_zero_speed() {
        let life = rating_life(
            &ratings(2000.0, 3000.0),
            &operating(1.0, 0.0, 0.0),
            &ServiceConditions {
                life_hours: Some(100.0),
                ..Default::default()
            },
        );
        assert!(life.l10_mrev.is_some());
        assert_eq!(life.l10h_hours, None);
        assert_eq!(life.meets_required_life, None);
    }

    #[test]
    fn test_zero_load_is_unbounded() {
        let life = rating_life(
            &ratings(2000.0, 3000.0),
            &operating(0.0, 0.0, 500.0),
            &ServiceConditions {
                life_hours: Some(50_000.0),
                ..Default::default()
            },
        );
        assert_eq!(life.l10_mrev, None);
        assert_eq!(life.l10h_hours, None);
        assert_eq!(life.static_safety_factor, None);
        assert_eq!(life.meets_required_life, Some(true));
    }

    #[test]
    fn test_service_validation() {
        assert!(ServiceConditions::default().validate().is_ok());
        let hot = ServiceConditions {
            temperature_c: Some(300.0),
            ..Default::default()
        };
        assert_eq!(hot.validate().unwrap_err().error_code(), "INVALID_INPUT");
        let negative = ServiceConditions {
            life_hours: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_service_json_defaults() {
        let service: ServiceConditions = serde_json::from_str(r#"{"mounting":"Floating"}"#).unwrap();
        assert_eq!(service.mounting, Some(Mounting::Floating));
        assert_eq!(service.life_hours, None);
        assert_eq!(Environment::Corrosive.to_string(), "Corrosive");
    }
}
