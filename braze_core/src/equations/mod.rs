//! # Sheet Metal Engineering Equations
//!
//! Closed-form relations used when sizing sheet metal joints and tooling,
//! each of which can be rearranged for any single unknown.
//!
//! ## Modules
//!
//! - [`registry`] - The equation catalog: ids, variables, units, relations
//! - [`solver`] - Substitute known values and solve for the unknown
//! - [`expr`] - Symbolic expression tree for the relations
//! - [`polynomial`] - Rational reduction and closed-form root finding
//!
//! ## Example
//!
//! ```rust
//! use braze_core::equations::{bind, solve};
//!
//! let solution = solve("shear-stress", &bind(&[("stress", 30000.0), ("area", 0.5)])).unwrap();
//! assert_eq!(solution.unknown, "force");
//! assert!((solution.value - 15000.0).abs() < 1e-9);
//! ```
//!
//! ## Units
//!
//! All relations use US customary units: lbf, psi, in, in-lbf. Values are
//! plain `f64`; the units listed for each variable are for display only.

use std::collections::HashMap;

pub mod expr;
pub mod polynomial;
pub mod registry;
pub mod solver;

pub use expr::Expr;
pub use registry::{
    catalog, generate_equations_markdown, Domain, Equation, EquationCategory, EquationDefinition,
    EquationMetadata, Variable, ALL_EQUATIONS,
};
pub use solver::{solve, solve_equation, solve_for, Solution};

/// Known variable values, keyed by symbol.
pub type Bindings = HashMap<String, f64>;

/// Build a [`Bindings`] map from `(symbol, value)` pairs.
pub fn bind(pairs: &[(&str, f64)]) -> Bindings {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}
