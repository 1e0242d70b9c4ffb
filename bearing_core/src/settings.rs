//! # Engine Settings
//!
//! Constants the calculation pipeline is parameterised on. The defaults are
//! the values used for four-row cylindrical roller bearings; a TOML file
//! can override any subset of them.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_toml_str("clearance_margin = 0.03").unwrap();
//! assert_eq!(settings.clearance_margin, 0.03);
//! assert_eq!(settings.material_factor_bm, 1.1); // untouched keys keep defaults
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Tunable constants for the geometry and rating pipeline.
///
/// ## TOML Example
///
/// ```toml
/// clearance_margin = 0.02
/// corner_radius_factor = 0.75
/// material_factor_bm = 1.1
/// static_rating_constant = 44.0
/// interpolation_epsilon = 1e-6
/// custom_r_min_mm = 0.2
/// custom_r_max_mm = 0.6
/// steel_density = 7.85e-3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Safety margin subtracted from the max roller diameter when filtering
    /// the catalog, as a fraction of the pitch diameter
    pub clearance_margin: f64,

    /// Corner radius r as a fraction of the catalog r_max
    pub corner_radius_factor: f64,

    /// Material/processing factor bm for the dynamic rating
    pub material_factor_bm: f64,

    /// Leading constant of the static rating (ISO 76, roller bearings)
    pub static_rating_constant: f64,

    /// Added to the anchor-blend denominator so coincident anchors stay finite
    pub interpolation_epsilon: f64,

    /// Minimum corner radius assumed for a custom roller (mm)
    pub custom_r_min_mm: f64,

    /// Maximum corner radius assumed for a custom roller (mm)
    pub custom_r_max_mm: f64,

    /// Steel density used for the custom roller mass estimate (g/mm³)
    pub steel_density: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            clearance_margin: 0.02,
            corner_radius_factor: 0.75,
            material_factor_bm: 1.1,
            static_rating_constant: 44.0,
            interpolation_epsilon: 1e-6,
            custom_r_min_mm: 0.2,
            custom_r_max_mm: 0.6,
            steel_density: 7.85e-3,
        }
    }
}

impl EngineSettings {
    /// Parse settings from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: EngineSettings = toml::from_str(text)
            .map_err(|e| CalcError::config_error("<toml>", e.message().to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }

    /// Render settings as TOML (used to write a starter config file).
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Check every constant is finite and in a physically meaningful range.
    pub fn validate(&self) -> CalcResult<()> {
        let fraction = |key: &str, value: f64| -> CalcResult<()> {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(CalcError::config_error(key, format!("{} must be in [0, 1)", value)));
            }
            Ok(())
        };
        let positive = |key: &str, value: f64| -> CalcResult<()> {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::config_error(key, format!("{} must be positive", value)));
            }
            Ok(())
        };

        fraction("clearance_margin", self.clearance_margin)?;
        positive("corner_radius_factor", self.corner_radius_factor)?;
        positive("material_factor_bm", self.material_factor_bm)?;
        positive("static_rating_constant", self.static_rating_constant)?;
        positive("interpolation_epsilon", self.interpolation_epsilon)?;
        positive("custom_r_min_mm", self.custom_r_min_mm)?;
        positive("custom_r_max_mm", self.custom_r_max_mm)?;
        positive("steel_density", self.steel_density)?;

        if self.custom_r_min_mm > self.custom_r_max_mm {
            return Err(CalcError::config_error(
                "custom_r_min_mm",
                "Minimum corner radius exceeds maximum",
            ));
        }
        Ok(())
    }
}
