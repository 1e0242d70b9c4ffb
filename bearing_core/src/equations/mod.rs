//! # Bearing Equations
//!
//! Every formula the design pipeline evaluates lives here, separate from
//! validation and table handling. Having equations in one place enables:
//! - Easy verification against ISO 281 / ISO 76
//! - Documentation of assumptions (α = 0°, solid steel rollers)
//! - A generated reference document ([`registry::generate_equations_markdown`])
//!
//! ## Modules
//!
//! - [`bearing`] - Internal geometry, roller sizing, load ratings, rating life
//! - [`registry`] - Equation metadata and tracking of equations applied
//!
//! ## Units
//!
//! - **Lengths**: mm
//! - **Loads and ratings**: N
//! - **Life**: 10⁶ revolutions or hours
//!
//! ## References
//!
//! - ISO 281:2007 Rolling bearings - Dynamic load ratings and rating life
//! - ISO 76:2006 Rolling bearings - Static load ratings

pub mod bearing;
pub mod registry;

// Re-export commonly used items
pub use bearing::{
    adjusted_max_roller_diameter,
    corner_radius,
    dynamic_load_rating,
    effective_roller_length,
    max_roller_diameter,
    pitch_diameter,
    rating_life_hours,
    rating_life_mrev,
    roller_count,
    roller_mass_per_100,
    static_load_rating,
    static_safety_factor,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
