//! # Bearing Calculations
//!
//! Each stage of the design follows the same pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - a result type (JSON-serializable)
//! - a pure function from input (plus the shared tables and settings) to
//!   `CalcResult<result>`
//!
//! ## Stages
//!
//! - [`race_groove`] - race-groove clearance F lookup
//! - [`geometry`] - pitch diameter, max roller diameter, roller count
//! - [`roller`] - catalog roller selection and custom rollers
//! - [`ratings`] - Cr / Cor load ratings
//! - [`life`] - L10 / L10h rating life and static safety factor
//! - [`design`] - the full pipeline

pub mod design;
pub mod geometry;
pub mod life;
pub mod race_groove;
pub mod ratings;
pub mod roller;

// Re-export commonly used types
pub use design::{calculate, prefill_geometry, DesignInput, DesignResult, OperatingInput};
pub use geometry::{resolve_geometry, DerivedGeometry, GeometryInput};
pub use life::{rating_life, Environment, Mounting, RatingLife, ServiceConditions};
pub use race_groove::{find_race_groove_f, InterpolationMethod, RaceGrooveLookup};
pub use ratings::{compute_ratings, LoadRatings};
pub use roller::{custom_roller, select_roller, CustomRoller, RollerSelection, RollerSource, SelectedRoller};
