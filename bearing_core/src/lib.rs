//! # bearing_core - Four-Row Cylindrical Roller Bearing Design Engine
//!
//! `bearing_core` is the computational heart of Rollwise. Given the boundary
//! dimensions of a bearing envelope and its operating loads, it derives the
//! internal geometry, selects a roller from a catalog and computes the
//! ISO 281 / ISO 76 load ratings and rating life. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Immutable tables**: Reference data is loaded once and shared read-only
//!
//! ## Quick Start
//!
//! ```rust
//! use bearing_core::calculations::{calculate, DesignInput, GeometryInput, OperatingInput};
//! use bearing_core::settings::EngineSettings;
//! use bearing_core::tables::LookupTables;
//!
//! let input = DesignInput::new(
//!     "B-1",
//!     GeometryInput { d_mm: 180.0, outer_d_mm: 250.0, b_mm: 160.0 },
//!     OperatingInput { radial_load_kn: 400.0, axial_load_kn: 50.0, rpm: 500.0, rows: 4 },
//! );
//!
//! let result = calculate(&input, LookupTables::builtin(), &EngineSettings::default()).unwrap();
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("roller_count"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The design pipeline and its stages
//! - [`equations`] - Pure formulas and the equation registry
//! - [`tables`] - Roller catalog, race-groove, fc and bearing tables
//! - [`settings`] - Engine constants, loadable from TOML
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod settings;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, DesignInput, DesignResult};
pub use errors::{CalcError, CalcResult, Stage};
pub use settings::EngineSettings;
pub use tables::LookupTables;
