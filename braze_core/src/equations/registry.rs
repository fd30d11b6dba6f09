//! # Equation Registry
//!
//! Central catalog of the sheet metal equations the resolver can rearrange.
//! Each equation has metadata (name, formula, reference, variables with units
//! and sign constraints) and a symbolic relation written as `residual = 0`.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Stable string ids for CLI and JSON callers (`Equation::from_id`)
//! - A process-wide catalog built once on first access
//! - Markdown export for EQUATIONS.md
//!
//! ## Usage
//!
//! ```rust
//! use braze_core::equations::registry::Equation;
//!
//! let eq = Equation::from_id("punching").unwrap();
//! assert_eq!(eq, Equation::PunchingForce);
//!
//! // Variables, in order, for building an input form
//! let symbols: Vec<&str> = eq.variable_symbols().collect();
//! assert_eq!(symbols, ["force", "perimeter", "thickness", "shearStrength"]);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::Bindings;
use crate::errors::{GuideError, GuideResult};

// ============================================================================
// Code References
// ============================================================================

/// Source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Mechanics of Materials by R.C. Hibbeler
    Hibbeler { edition: u8, chapter: u8 },
    /// Machinery's Handbook
    MachinerysHandbook { edition: u8, topic: &'static str },
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Hibbeler { edition, chapter } => {
                format!("Hibbeler, Mechanics of Materials {}ed, Ch. {}", edition, chapter)
            }
            CodeReference::MachinerysHandbook { edition, topic } => {
                format!("Machinery's Handbook {}ed, {}", edition, topic)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Stresses in joints and sections (shear, bending, bond line)
    Stresses,
    /// Press forces for punching and brake forming
    FormingForces,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Stresses => "Stresses",
            EquationCategory::FormingForces => "Forming Forces",
        }
    }

    /// Sort order for generated documentation (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Stresses => 1,
            EquationCategory::FormingForces => 2,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Sign constraint on a variable; roots outside it are not physical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Strictly greater than zero (lengths, areas, strengths)
    Positive,
    /// Zero or greater (loads and stresses; zero load is meaningful)
    NonNegative,
}

impl Domain {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            Domain::Positive => value > 0.0,
            Domain::NonNegative => value >= 0.0,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Domain::Positive => "> 0",
            Domain::NonNegative => ">= 0",
        }
    }
}

/// Definition of a variable used in an equation.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    /// Symbol used in bindings (e.g., "force", "thickness")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units (e.g., "lbf", "psi", "in")
    pub units: &'static str,
    pub domain: Domain,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str, domain: Domain) -> Self {
        Self { symbol, description, units, domain }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Descriptive metadata for a catalog equation.
#[derive(Debug, Clone, Serialize)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Punching Force")
    pub name: &'static str,
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    /// Variables in the order a form should present them
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
}

/// A catalog entry: metadata plus the relation `residual = 0`.
#[derive(Debug, Clone, Serialize)]
pub struct EquationDefinition {
    pub equation: Equation,
    pub metadata: EquationMetadata,
    #[serde(serialize_with = "serialize_relation")]
    pub relation: Expr,
}

fn serialize_relation<S: serde::Serializer>(relation: &Expr, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(relation)
}

impl EquationDefinition {
    /// Variable symbols in declaration order
    pub fn variable_symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metadata.variables.iter().map(|v| v.symbol)
    }

    pub fn variable(&self, symbol: &str) -> Option<&Variable> {
        self.metadata.variables.iter().find(|v| v.symbol == symbol)
    }
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations in the catalog.
///
/// Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Equation {
    /// force = stress * area
    ShearStress,
    /// stress = moment / sectionModulus
    BendingStress,
    /// force = perimeter * thickness * shearStrength
    PunchingForce,
    /// tau = V Q / (I b) along a bonded or brazed lap
    ShearFlow,
    /// F = k S_t t^2 W / (8 V_d) for V-die air bending
    AirBendingForce,
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::ShearStress,
    Equation::BendingStress,
    Equation::PunchingForce,
    Equation::ShearFlow,
    Equation::AirBendingForce,
];

static CATALOG: Lazy<Vec<EquationDefinition>> = Lazy::new(|| {
    ALL_EQUATIONS
        .iter()
        .map(|eq| EquationDefinition {
            equation: *eq,
            metadata: eq.build_metadata(),
            relation: eq.build_relation(),
        })
        .collect()
});

/// The full catalog, in declaration order.
pub fn catalog() -> &'static [EquationDefinition] {
    &CATALOG
}

fn v(symbol: &str) -> Expr {
    Expr::var(symbol)
}

impl Equation {
    /// Stable identifier used by the CLI and JSON callers
    pub fn id(&self) -> &'static str {
        match self {
            Equation::ShearStress => "shear-stress",
            Equation::BendingStress => "bending-stress",
            Equation::PunchingForce => "punching-force",
            Equation::ShearFlow => "shear-flow",
            Equation::AirBendingForce => "air-bending-force",
        }
    }

    /// Parse from an id or a common alias.
    ///
    /// Case-insensitive; underscores and spaces are read as hyphens.
    pub fn from_id(id: &str) -> GuideResult<Self> {
        match id.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "shear-stress" | "shear" | "direct-shear" => Ok(Equation::ShearStress),
            "bending-stress" | "bending" | "flexure" => Ok(Equation::BendingStress),
            "punching-force" | "punching" | "punch" | "blanking-force" => Ok(Equation::PunchingForce),
            "shear-flow" | "bond-shear" => Ok(Equation::ShearFlow),
            "air-bending-force" | "air-bending" | "air-bend" | "press-brake" => Ok(Equation::AirBendingForce),
            _ => Err(GuideError::unknown_equation(id)),
        }
    }

    /// The catalog entry for this equation
    pub fn definition(&self) -> &'static EquationDefinition {
        &CATALOG[*self as usize]
    }

    pub fn metadata(&self) -> &'static EquationMetadata {
        &self.definition().metadata
    }

    /// The relation as `residual = 0`
    pub fn relation(&self) -> &'static Expr {
        &self.definition().relation
    }

    pub fn variable_symbols(&self) -> impl Iterator<Item = &'static str> {
        self.definition().variable_symbols()
    }

    /// Evaluate the residual with every variable bound.
    ///
    /// Zero (within rounding) means the values satisfy the equation.
    pub fn residual(&self, bindings: &Bindings) -> GuideResult<f64> {
        let definition = self.definition();
        let missing: Vec<String> = definition
            .variable_symbols()
            .filter(|s| !bindings.contains_key(*s))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(GuideError::under_constrained(self.id(), missing));
        }
        definition
            .relation
            .eval(bindings)
            .ok_or_else(|| GuideError::under_constrained(self.id(), Vec::new()))
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
        let mut cats = vec![EquationCategory::FormingForces, EquationCategory::Stresses];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }

    fn build_relation(&self) -> Expr {
        match self {
            Equation::ShearStress => v("force") - v("stress") * v("area"),
            Equation::BendingStress => v("stress") - v("moment") / v("sectionModulus"),
            Equation::PunchingForce => v("force") - v("perimeter") * v("thickness") * v("shearStrength"),
            Equation::ShearFlow => {
                v("stress") - v("shearForce") * v("firstMoment") / (v("momentOfInertia") * v("bondWidth"))
            }
            Equation::AirBendingForce => {
                v("force")
                    - v("dieFactor") * v("tensileStrength") * v("thickness").powi(2) * v("width")
                        / (Expr::constant(8.0) * v("dieOpening"))
            }
        }
    }

    fn build_metadata(&self) -> EquationMetadata {
        use Domain::{NonNegative, Positive};

        match self {
            Equation::ShearStress => EquationMetadata {
                name: "Direct Shear",
                description: "Shear load carried by a joint area at a given average shear stress",
                formula_plain: "force = stress * area",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("force", "Shear force", "lbf", NonNegative),
                    Variable::new("stress", "Average shear stress", "psi", NonNegative),
                    Variable::new("area", "Area in shear", "in^2", Positive),
                ],
                assumptions: vec!["Uniform stress over the sheared area"],
                category: EquationCategory::Stresses,
            },

            Equation::BendingStress => EquationMetadata {
                name: "Bending Stress",
                description: "Extreme fiber bending stress from moment and elastic section modulus",
                formula_plain: "stress = moment / sectionModulus",
                reference: CodeReference::Hibbeler { edition: 10, chapter: 6 },
                variables: vec![
                    Variable::new("stress", "Bending stress", "psi", NonNegative),
                    Variable::new("moment", "Bending moment", "in-lbf", NonNegative),
                    Variable::new("sectionModulus", "Elastic section modulus", "in^3", Positive),
                ],
                assumptions: vec!["Linear elastic material", "Plane sections remain plane"],
                category: EquationCategory::Stresses,
            },

            Equation::PunchingForce => EquationMetadata {
                name: "Punching Force",
                description: "Press force to punch or blank a part from sheet",
                formula_plain: "force = perimeter * thickness * shearStrength",
                reference: CodeReference::MachinerysHandbook {
                    edition: 31,
                    topic: "Punching and blanking force",
                },
                variables: vec![
                    Variable::new("force", "Punching force", "lbf", NonNegative),
                    Variable::new("perimeter", "Total length of cut/perimeter", "in", Positive),
                    Variable::new("thickness", "Sheet thickness", "in", Positive),
                    Variable::new("shearStrength", "Shear strength of material", "psi", Positive),
                ],
                assumptions: vec!["Flat-faced punch (no shear angle)", "Stripping force not included"],
                category: EquationCategory::FormingForces,
            },

            Equation::ShearFlow => EquationMetadata {
                name: "Shear Flow Between Bonded Plates",
                description: "Shear stress on the bond line of a built-up section under transverse shear",
                formula_plain: "stress = shearForce * firstMoment / (momentOfInertia * bondWidth)",
                reference: CodeReference::Hibbeler { edition: 10, chapter: 7 },
                variables: vec![
                    Variable::new("stress", "Shear stress", "psi", NonNegative),
                    Variable::new("shearForce", "Shear force", "lbf", NonNegative),
                    Variable::new("firstMoment", "First moment of area about the neutral axis", "in^3", Positive),
                    Variable::new("momentOfInertia", "Moment of inertia of the section", "in^4", Positive),
                    Variable::new("bondWidth", "Width of the bond line", "in", Positive),
                ],
                assumptions: vec!["Bond line acts as a rigid connection", "Linear elastic section"],
                category: EquationCategory::Stresses,
            },

            Equation::AirBendingForce => EquationMetadata {
                name: "Air Bending Force (approximate)",
                description: "Press brake force for V-die air bending",
                formula_plain: "force = dieFactor * tensileStrength * thickness^2 * width / (8 * dieOpening)",
                reference: CodeReference::MachinerysHandbook {
                    edition: 31,
                    topic: "Press brake bending force",
                },
                variables: vec![
                    Variable::new("force", "Bending force", "lbf", NonNegative),
                    Variable::new("dieFactor", "Die/geometry factor (about 1.33 for V-die air bend)", "-", Positive),
                    Variable::new("tensileStrength", "Tensile strength", "psi", Positive),
                    Variable::new("thickness", "Sheet thickness", "in", Positive),
                    Variable::new("width", "Part width engaged", "in", Positive),
                    Variable::new("dieOpening", "V-die opening", "in", Positive),
                ],
                assumptions: vec![
                    "Die opening roughly 8x sheet thickness",
                    "Air bending, not bottoming or coining",
                ],
                category: EquationCategory::FormingForces,
            },
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// # Example
///
/// ```rust
/// use braze_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Brazeguide Equations Reference"));
/// assert!(markdown.contains("Forming Forces"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(r#"# Brazeguide Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Each equation can be solved for any one of its variables. Supply every other
variable, leave the unknown out, and the solver rearranges the relation.

## Root Selection

Rearranging can produce more than one algebraic root (for example solving the
air bending force for thickness gives `+t` and `-t`). Only roots inside the
unknown's **Domain** are kept. If none remain the result is "no real
solution"; if more than one remains the result is "ambiguous solution" and no
root is picked.

---

"#);

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
            output.push_str(&format!("**Id:** `{}`\n\n", equation.id()));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
            output.push_str(&format!("**Residual:** `{} = 0`\n\n", equation.relation()));

            output.push_str("**Variables:**\n\n");
            output.push_str("| Symbol | Description | Units | Domain |\n");
            output.push_str("|--------|-------------|-------|--------|\n");
            for var in &meta.variables {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    var.symbol,
                    var.description,
                    var.units,
                    var.domain.describe()
                ));
            }
            output.push('\n');

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));

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
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str("Equations are reminders only. Validate against detailed design references and safety factors.\n");

    output
}

// ============================================================================
// Tests
// ============================================================================
