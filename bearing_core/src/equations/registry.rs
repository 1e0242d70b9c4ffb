//! # Equation Registry
//!
//! Central registry of every formula the design pipeline applies. Each
//! equation carries metadata (plain-text formula, standard reference,
//! variables, assumptions, implementing function) so a design can be audited
//! line by line.
//!
//! ## Usage
//!
//! ```rust
//! use bearing_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::DynamicLoadRating, "Catalog roller 16 x 24");
//!
//! let meta = Equation::DynamicLoadRating.metadata();
//! assert!(meta.formula_plain.contains("^(7/9)"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the standard or source an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// ISO 281 - Dynamic load ratings and rating life
    Iso281 { year: u16, clause: &'static str },
    /// ISO 76 - Static load ratings
    Iso76 { year: u16, clause: &'static str },
    /// Plane geometry (no standard reference needed)
    Geometry,
    /// Design convention for this bearing family
    DesignPractice { note: &'static str },
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Iso281 { year, clause } => format!("ISO 281:{} {}", year, clause),
            CodeReference::Iso76 { year, clause } => format!("ISO 76:{} {}", year, clause),
            CodeReference::Geometry => "Plane Geometry".to_string(),
            CodeReference::DesignPractice { note } => format!("Design practice ({})", note),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Iso281 { .. } => "ISO 281",
            CodeReference::Iso76 { .. } => "ISO 76",
            CodeReference::Geometry => "Geometry",
            CodeReference::DesignPractice { .. } => "Practice",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Pitch circle, max roller diameter, roller count
    InternalGeometry,
    /// Table interpolation (race groove, fc)
    Interpolation,
    /// Corner radius, effective length, roller mass
    RollerSizing,
    /// Cr and Cor
    LoadRatings,
    /// L10, L10h, s0
    RatingLife,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::InternalGeometry => "Internal Geometry",
            EquationCategory::Interpolation => "Interpolation",
            EquationCategory::RollerSizing => "Roller Sizing",
            EquationCategory::LoadRatings => "Load Ratings",
            EquationCategory::RatingLife => "Rating Life",
        }
    }

    /// Order of appearance in generated documents (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Interpolation => 1,
            EquationCategory::InternalGeometry => 2,
            EquationCategory::RollerSizing => 3,
            EquationCategory::LoadRatings => 4,
            EquationCategory::RatingLife => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Basic Dynamic Load Rating")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Standard reference
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the design pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// F = F_l + w (F_u - F_l)
    RaceGrooveBlend,
    /// Dpw = (d + D)/2
    PitchDiameter,
    /// Dw_max = Dpw - F
    MaxRollerDiameter,
    /// Dw_adj = Dw_max - m Dpw
    AdjustedMaxRollerDiameter,
    /// Z = floor(π / asin(Dw_max/Dpw))
    RollerCount,
    /// r = 0.75 r_max
    CornerRadius,
    /// Lwe = Lw - 2r
    EffectiveRollerLength,
    /// m_100 = π (Dw/2)² Lw ρ 100
    CustomRollerMass,
    /// fc by linear interpolation, clamped
    FcInterpolation,
    /// Cr = bm fc (i Lwe)^(7/9) Z^(3/4) Dw^(29/27)
    DynamicLoadRating,
    /// Cor = 44 (1 - Dw/Dpw) i Z Lwe Dw
    StaticLoadRating,
    /// P = Fr
    EquivalentLoad,
    /// L10 = (Cr/P)^(10/3)
    RatingLifeRevolutions,
    /// L10h = 10⁶ L10 / (60 n)
    RatingLifeHours,
    /// s0 = Cor/P0
    StaticSafetyFactor,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::RaceGrooveBlend => EquationMetadata {
                name: "Race-Groove Clearance Blend",
                description: "Race-groove clearance between the nearest lower and upper table anchors",
                formula_plain: "w = ((d - d_l) + (D - D_l)) / ((d_u - d_l) + (D_u - D_l) + eps), F = F_l + w (F_u - F_l)",
                reference: CodeReference::DesignPractice { note: "race-groove table" },
                variables: vec![
                    Variable::new("d, D", "Bore and outer diameter of the design", "mm"),
                    Variable::new("d_l, D_l, F_l", "Lower anchor row", "mm"),
                    Variable::new("d_u, D_u, F_u", "Upper anchor row", "mm"),
                    Variable::new("eps", "Small constant keeping coincident anchors finite", "mm"),
                ],
                assumptions: vec![
                    "Exact table matches bypass the blend",
                    "Missing anchors fall back to the nearest row by |d - d_i| + |D - D_i|",
                ],
                category: EquationCategory::Interpolation,
                source_module: "calculations/race_groove.rs",
                source_function: "blend_anchors",
            },

            Equation::PitchDiameter => EquationMetadata {
                name: "Pitch Diameter",
                description: "Diameter of the circle through the roller centres",
                formula_plain: "Dpw = (d + D) / 2",
                reference: CodeReference::Geometry,
                variables: vec![
                    Variable::new("Dpw", "Pitch diameter", "mm"),
                    Variable::new("d", "Bore diameter", "mm"),
                    Variable::new("D", "Outer diameter", "mm"),
                ],
                assumptions: vec!["Rollers centred midway between bore and outer diameter"],
                category: EquationCategory::InternalGeometry,
                source_module: "equations/bearing.rs",
                source_function: "pitch_diameter",
            },

            Equation::MaxRollerDiameter => EquationMetadata {
                name: "Maximum Roller Diameter",
                description: "Largest roller diameter left after the race-groove clearance",
                formula_plain: "Dw_max = 2 (Dpw/2 - F/2) = Dpw - F",
                reference: CodeReference::DesignPractice { note: "race-groove clearance" },
                variables: vec![
                    Variable::new("Dw_max", "Maximum theoretical roller diameter", "mm"),
                    Variable::new("F", "Race-groove clearance", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::InternalGeometry,
                source_module: "equations/bearing.rs",
                source_function: "max_roller_diameter",
            },

            Equation::AdjustedMaxRollerDiameter => EquationMetadata {
                name: "Adjusted Maximum Roller Diameter",
                description: "Max roller diameter less an assembly clearance margin, used for catalog filtering",
                formula_plain: "Dw_adj = Dw_max - m Dpw",
                reference: CodeReference::DesignPractice { note: "2% pitch-diameter margin" },
                variables: vec![
                    Variable::new("Dw_adj", "Adjusted maximum roller diameter", "mm"),
                    Variable::new("m", "Clearance margin (default 0.02)", "-"),
                ],
                assumptions: vec!["Not applied to the roller count"],
                category: EquationCategory::InternalGeometry,
                source_module: "equations/bearing.rs",
                source_function: "adjusted_max_roller_diameter",
            },

            Equation::RollerCount => EquationMetadata {
                name: "Rollers per Row",
                description: "Number of rollers of diameter Dw_max that fit around the pitch circle",
                formula_plain: "Z = floor(pi / asin(Dw_max / Dpw))",
                reference: CodeReference::Geometry,
                variables: vec![
                    Variable::new("Z", "Rollers per row", "-"),
                    Variable::new("Dw_max", "Maximum roller diameter", "mm"),
                    Variable::new("Dpw", "Pitch diameter", "mm"),
                ],
                assumptions: vec![
                    "Requires 0 < Dw_max / Dpw < 1",
                    "Uses the unadjusted maximum roller diameter",
                ],
                category: EquationCategory::InternalGeometry,
                source_module: "equations/bearing.rs",
                source_function: "roller_count",
            },

            Equation::CornerRadius => EquationMetadata {
                name: "Roller Corner Radius",
                description: "Corner radius assumed for a catalog roller",
                formula_plain: "r = 0.75 r_max",
                reference: CodeReference::DesignPractice { note: "corner radius factor" },
                variables: vec![
                    Variable::new("r", "Corner radius", "mm"),
                    Variable::new("r_max", "Catalog maximum corner radius", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::RollerSizing,
                source_module: "equations/bearing.rs",
                source_function: "corner_radius",
            },

            Equation::EffectiveRollerLength => EquationMetadata {
                name: "Effective Roller Length",
                description: "Roller length carrying load, net of corner relief at both ends",
                formula_plain: "Lwe = Lw - 2r",
                reference: CodeReference::Iso281 { year: 2007, clause: "3.1" },
                variables: vec![
                    Variable::new("Lwe", "Effective roller length", "mm"),
                    Variable::new("Lw", "Roller length", "mm"),
                    Variable::new("r", "Corner radius", "mm"),
                ],
                assumptions: vec!["Lwe must be positive"],
                category: EquationCategory::RollerSizing,
                source_module: "equations/bearing.rs",
                source_function: "effective_roller_length",
            },

            Equation::CustomRollerMass => EquationMetadata {
                name: "Custom Roller Mass",
                description: "Mass of 100 solid steel rollers of a non-catalog size",
                formula_plain: "m_100 = pi (Dw/2)^2 Lw rho 100",
                reference: CodeReference::Geometry,
                variables: vec![
                    Variable::new("m_100", "Mass of 100 rollers", "g"),
                    Variable::new("rho", "Steel density (7.85e-3)", "g/mm^3"),
                ],
                assumptions: vec!["Solid cylinder, corner radii neglected", "Rounded to 3 decimals"],
                category: EquationCategory::RollerSizing,
                source_module: "equations/bearing.rs",
                source_function: "roller_mass_per_100",
            },

            Equation::FcInterpolation => EquationMetadata {
                name: "Geometry Factor fc",
                description: "fc interpolated linearly from the tabulated Dwe cos(a) / Dpw ratio",
                formula_plain: "fc = fc_l + (x - x_l)/(x_u - x_l) (fc_u - fc_l), x = clamp(Dw/Dpw)",
                reference: CodeReference::Iso281 { year: 2007, clause: "Table 7" },
                variables: vec![
                    Variable::new("x", "Dwe cos(a) / Dpw, clamped to the table domain", "-"),
                    Variable::new("fc", "Geometry factor", "-"),
                ],
                assumptions: vec!["Contact angle a = 0", "No extrapolation beyond the table"],
                category: EquationCategory::Interpolation,
                source_module: "tables/fc_factor.rs",
                source_function: "fc_at",
            },

            Equation::DynamicLoadRating => EquationMetadata {
                name: "Basic Dynamic Load Rating",
                description: "Basic dynamic radial load rating of a radial roller bearing",
                formula_plain: "Cr = bm fc (i Lwe)^(7/9) Z^(3/4) Dw^(29/27)",
                reference: CodeReference::Iso281 { year: 2007, clause: "7.1.1" },
                variables: vec![
                    Variable::new("Cr", "Basic dynamic radial load rating", "N"),
                    Variable::new("bm", "Material factor (1.1)", "-"),
                    Variable::new("i", "Number of rows", "-"),
                    Variable::new("Dw", "Roller diameter", "mm"),
                ],
                assumptions: vec!["Contact angle a = 0, cos(a) = 1"],
                category: EquationCategory::LoadRatings,
                source_module: "equations/bearing.rs",
                source_function: "dynamic_load_rating",
            },

            Equation::StaticLoadRating => EquationMetadata {
                name: "Basic Static Load Rating",
                description: "Basic static radial load rating of a radial roller bearing",
                formula_plain: "Cor = 44 (1 - Dw/Dpw) i Z Lwe Dw",
                reference: CodeReference::Iso76 { year: 2006, clause: "6.1.2" },
                variables: vec![
                    Variable::new("Cor", "Basic static radial load rating", "N"),
                    Variable::new("Lwe", "Effective roller length", "mm"),
                ],
                assumptions: vec!["Contact angle a = 0, cos(a) = 1"],
                category: EquationCategory::LoadRatings,
                source_module: "equations/bearing.rs",
                source_function: "static_load_rating",
            },

            Equation::EquivalentLoad => EquationMetadata {
                name: "Equivalent Radial Load",
                description: "Dynamic and static equivalent load of a cylindrical roller bearing",
                formula_plain: "P = P0 = Fr",
                reference: CodeReference::Iso281 { year: 2007, clause: "6.2" },
                variables: vec![
                    Variable::new("P, P0", "Equivalent dynamic / static load", "N"),
                    Variable::new("Fr", "Radial load", "N"),
                ],
                assumptions: vec!["Axial load is not carried by the roller set"],
                category: EquationCategory::RatingLife,
                source_module: "calculations/life.rs",
                source_function: "rating_life",
            },

            Equation::RatingLifeRevolutions => EquationMetadata {
                name: "Basic Rating Life",
                description: "Basic rating life in millions of revolutions",
                formula_plain: "L10 = (Cr / P)^(10/3)",
                reference: CodeReference::Iso281 { year: 2007, clause: "7.2" },
                variables: vec![
                    Variable::new("L10", "Basic rating life", "10^6 rev"),
                    Variable::new("P", "Equivalent dynamic load", "N"),
                ],
                assumptions: vec!["90% reliability, conventional operating conditions"],
                category: EquationCategory::RatingLife,
                source_module: "equations/bearing.rs",
                source_function: "rating_life_mrev",
            },

            Equation::RatingLifeHours => EquationMetadata {
                name: "Basic Rating Life in Hours",
                description: "Basic rating life in operating hours at constant speed",
                formula_plain: "L10h = 10^6 L10 / (60 n)",
                reference: CodeReference::Iso281 { year: 2007, clause: "7.2" },
                variables: vec![
                    Variable::new("L10h", "Basic rating life", "h"),
                    Variable::new("n", "Rotational speed", "rpm"),
                ],
                assumptions: vec!["Constant speed"],
                category: EquationCategory::RatingLife,
                source_module: "equations/bearing.rs",
                source_function: "rating_life_hours",
            },

            Equation::StaticSafetyFactor => EquationMetadata {
                name: "Static Safety Factor",
                description: "Ratio of basic static load rating to static equivalent load",
                formula_plain: "s0 = Cor / P0",
                reference: CodeReference::Iso76 { year: 2006, clause: "Annex A" },
                variables: vec![
                    Variable::new("s0", "Static safety factor", "-"),
                    Variable::new("P0", "Static equivalent load", "N"),
                ],
                assumptions: vec![],
                category: EquationCategory::RatingLife,
                source_module: "equations/bearing.rs",
                source_function: "static_safety_factor",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, sorted
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![InternalGeometry, Interpolation, RollerSizing, LoadRatings, RatingLife];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::RaceGrooveBlend,
    Equation::PitchDiameter,
    Equation::MaxRollerDiameter,
    Equation::AdjustedMaxRollerDiameter,
    Equation::RollerCount,
    Equation::CornerRadius,
    Equation::EffectiveRollerLength,
    Equation::CustomRollerMass,
    Equation::FcInterpolation,
    Equation::DynamicLoadRating,
    Equation::StaticLoadRating,
    Equation::EquivalentLoad,
    Equation::RatingLifeRevolutions,
    Equation::RatingLifeHours,
    Equation::StaticSafetyFactor,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being applied during a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where/why it was used (e.g., "roller 16 x 24")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Unique equations grouped by category, categories sorted
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Markdown list of the equations applied, grouped by category.
    pub fn generate_appendix_markdown(&self) -> String {
        let mut output = String::from("## Equations Applied\n\n");
        let grouped = self.by_category();
        if grouped.is_empty() {
            output.push_str("_No equations recorded._\n");
            return output;
        }

        for (category, equations) in grouped {
            output.push_str(&format!("### {}\n\n", category.display_name()));
            for equation in equations {
                let meta = equation.metadata();
                let contexts: Vec<&str> = self
                    .usages
                    .iter()
                    .filter(|u| u.equation == equation)
                    .map(|u| u.context.as_str())
                    .collect();
                output.push_str(&format!(
                    "- **{}**: `{}` ({}) - {}\n",
                    meta.name,
                    meta.formula_plain,
                    meta.reference.citation(),
                    contexts.join("; ")
                ));
            }
            output.push('\n');
        }
        output
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate the complete EQUATIONS.md reference document.
///
/// # Example
///
/// ```rust
/// use bearing_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Rollwise Equations Reference"));
/// assert!(markdown.contains("Load Ratings"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Rollwise Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Every formula used to size a four-row cylindrical roller bearing, with its
reference, variables, and implementing function.

## Conventions

| Quantity | Unit |
|----------|------|
| Lengths and diameters | mm |
| Operating loads | kN (converted to N for life checks) |
| Load ratings | N |
| Contact angle | 0 deg (cos a = 1) |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
