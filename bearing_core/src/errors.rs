//! # Error Types
//!
//! Structured error types for bearing_core. Every error names the pipeline
//! stage and the offending input so a caller can display a precise message
//! or hand the JSON form to another program.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::errors::{CalcError, CalcResult};
//!
//! fn validate_bore(d_mm: f64) -> CalcResult<()> {
//!     if d_mm <= 0.0 {
//!         return Err(CalcError::invalid_input("d_mm", d_mm.to_string(), "Bore must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_bore(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bearing_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Input validation before the pipeline runs
    Input,
    /// Reference table loading
    Tables,
    /// Race-groove F lookup
    RaceGroove,
    /// Pitch diameter / roller count resolution
    Geometry,
    /// Cr / Cor evaluation
    LoadRating,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Input => "input validation",
            Stage::Tables => "table loading",
            Stage::RaceGroove => "race-groove lookup",
            Stage::Geometry => "geometry resolution",
            Stage::LoadRating => "load rating",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Structured error type for design calculations.
///
/// Each variant provides specific context about what went wrong. None of
/// them are retryable: the computation is deterministic, so the caller has
/// to change the inputs and resubmit.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value violates a stated invariant (D <= d, i outside 1-8, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A reference table required for a step is empty or malformed
    #[error("Lookup failed in {table} table during {stage}: {reason}")]
    LookupFailed {
        stage: Stage,
        table: String,
        reason: String,
    },

    /// Derived geometry is physically infeasible
    #[error("Infeasible geometry during {stage}: {reason}")]
    GeometryInfeasible { stage: Stage, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// CSV / JSON serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Engine settings could not be parsed or hold out-of-range values
    #[error("Configuration error for '{key}': {reason}")]
    ConfigError { key: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a LookupFailed error
    pub fn lookup_failed(stage: Stage, table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::LookupFailed {
            stage,
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a GeometryInfeasible error
    pub fn geometry_infeasible(stage: Stage, reason: impl Into<String>) -> Self {
        CalcError::GeometryInfeasible {
            stage,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(key: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Pipeline stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            CalcError::InvalidInput { .. } => Stage::Input,
            CalcError::LookupFailed { stage, .. } | CalcError::GeometryInfeasible { stage, .. } => *stage,
            CalcError::FileError { .. }
            | CalcError::SerializationError { .. }
            | CalcError::ConfigError { .. } => Stage::Tables,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::LookupFailed { .. } => "LOOKUP_FAILED",
            CalcError::GeometryInfeasible { .. } => "GEOMETRY_INFEASIBLE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<csv::Error> for CalcError {
    fn from(e: csv::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}
