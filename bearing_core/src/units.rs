//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the engine exchanges with
//! its host. They are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Conventions
//!
//! - Length: millimeters (mm) throughout the geometry pipeline
//! - Load inputs: kilonewtons (kN), as entered on bearing data sheets
//! - Load ratings: newtons (N), the unit the ISO 281 constants produce
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::units::{KiloNewtons, Newtons};
//!
//! let fr = KiloNewtons(400.0);
//! let fr_n: Newtons = fr.into();
//! assert_eq!(fr_n.0, 400_000.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Millimeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} mm", self.0)
    }
}

impl std::fmt::Display for Newtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} N", self.0)
    }
}

impl std::fmt::Display for KiloNewtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kN", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_conversion() {
        let n: Newtons = KiloNewtons(1.5).into();
        assert_eq!(n.0, 1500.0);

        let kn: KiloNewtons = Newtons(2500.0).into();
        assert_eq!(kn.0, 2.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Millimeters(21.0).to_string(), "21.00 mm");
        assert_eq!(KiloNewtons(400.0).to_string(), "400.00 kN");
        assert_eq!(Newtons(1234.4).to_string(), "1234 N");
    }

    #[test]
    fn test_serialization_transparent() {
        let json = serde_json::to_string(&Newtons(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }
}
