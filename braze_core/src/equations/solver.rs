//! # Equation Resolver
//!
//! Solves a catalog equation for its single unbound variable.
//!
//! The known values are substituted into the relation, the residual is
//! reduced to `N(x) / D(x)` in the unknown, and the real roots of `N` are
//! found in closed form. Roots that make `D` vanish or fall outside the
//! unknown's [`Domain`](super::registry::Domain) are discarded. Exactly one
//! surviving root is the answer; none or several are reported as errors.
//!
//! ## Example
//!
//! ```rust
//! use braze_core::equations::{bind, solve, solve_for};
//! use braze_core::errors::GuideError;
//!
//! // Leave one variable out and it is solved for
//! let s = solve("bending-stress", &bind(&[("stress", 20000.0), ("sectionModulus", 0.1)])).unwrap();
//! assert_eq!(s.unknown, "moment");
//! assert!((s.value - 2000.0).abs() < 1e-9);
//!
//! // Or name the unknown explicitly, as a form would
//! let s = solve_for(
//!     "punching-force",
//!     "thickness",
//!     &bind(&[("force", 20000.0), ("perimeter", 10.0), ("shearStrength", 40000.0)]),
//! ).unwrap();
//! assert!((s.value - 0.05).abs() < 1e-12);
//!
//! // Two unknowns cannot be solved
//! let err = solve("shear-stress", &bind(&[("area", 0.5)])).unwrap_err();
//! assert!(matches!(err, GuideError::UnderConstrained { .. }));
//! ```

use serde::Serialize;

use super::polynomial::{reduce, ReduceError, RootSet};
use super::registry::{Equation, EquationDefinition};
use super::Bindings;
use crate::errors::{GuideError, GuideResult};

/// Roots closer than this (relative) are the same root
const ROOT_MERGE_TOLERANCE: f64 = 1e-9;

/// Result of solving an equation for its unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub equation: Equation,
    /// Symbol that was solved for
    pub unknown: String,
    pub value: f64,
    /// Units of the unknown, for display
    pub units: &'static str,
}

/// Solve `equation_id` for the one variable missing from `bindings`.
///
/// # Errors
///
/// - `UnknownEquation` if the id is not in the catalog
/// - `UnrecognizedVariable` if a binding is not a variable of the equation
/// - `OverConstrained` if every variable is bound
/// - `UnderConstrained` if two or more are missing
/// - `InvalidValue` if a known value is not finite or violates its domain
/// - `NoRealSolution` / `AmbiguousSolution` after physical root filtering
pub fn solve(equation_id: &str, bindings: &Bindings) -> GuideResult<Solution> {
    let equation = Equation::from_id(equation_id)?;
    solve_equation(equation, bindings)
}

/// [`solve`] for an already-resolved [`Equation`].
pub fn solve_equation(equation: Equation, bindings: &Bindings) -> GuideResult<Solution> {
    let definition = equation.definition();
    check_recognized(definition, bindings)?;

    let mut missing = missing_symbols(definition, bindings, None);
    match missing.len() {
        0 => Err(GuideError::over_constrained(equation.id())),
        1 => {
            let unknown = missing.remove(0);
            resolve(definition, &unknown, bindings)
        }
        _ => Err(GuideError::under_constrained(equation.id(), missing)),
    }
}

/// Solve for a caller-chosen `unknown`.
///
/// A binding for the unknown itself is ignored, so a form can pass every
/// field it holds. Every other variable must be bound.
pub fn solve_for(equation_id: &str, unknown: &str, bindings: &Bindings) -> GuideResult<Solution> {
    let equation = Equation::from_id(equation_id)?;
    let definition = equation.definition();

    if definition.variable(unknown).is_none() {
        return Err(GuideError::unrecognized_variable(equation.id(), unknown));
    }
    check_recognized(definition, bindings)?;

    let missing = missing_symbols(definition, bindings, Some(unknown));
    if !missing.is_empty() {
        return Err(GuideError::under_constrained(equation.id(), missing));
    }

    let known: Bindings = bindings
        .iter()
        .filter(|(symbol, _)| symbol.as_str() != unknown)
        .map(|(symbol, value)| (symbol.clone(), *value))
        .collect();
    resolve(definition, unknown, &known)
}

/// Reject bindings that are not variables of the equation.
fn check_recognized(definition: &EquationDefinition, bindings: &Bindings) -> GuideResult<()> {
    let mut symbols: Vec<&String> = bindings.keys().collect();
    symbols.sort();
    match symbols.into_iter().find(|s| definition.variable(s).is_none()) {
        Some(symbol) => Err(GuideError::unrecognized_variable(definition.equation.id(), symbol.as_str())),
        None => Ok(()),
    }
}

/// Unbound variables in declaration order, skipping `except`
fn missing_symbols(definition: &EquationDefinition, bindings: &Bindings, except: Option<&str>) -> Vec<String> {
    definition
        .variable_symbols()
        .filter(|s| Some(*s) != except && !bindings.contains_key(*s))
        .map(String::from)
        .collect()
}

/// Known values must be finite and inside their variable's domain.
fn validate_known(definition: &EquationDefinition, unknown: &str, known: &Bindings) -> GuideResult<()> {
    for var in &definition.metadata.variables {
        if var.symbol == unknown {
            continue;
        }
        let Some(&value) = known.get(var.symbol) else {
            continue;
        };
        if !value.is_finite() {
            return Err(GuideError::invalid_value(var.symbol, value.to_string(), "Value must be finite"));
        }
        if !var.domain.contains(value) {
            return Err(GuideError::invalid_value(
                var.symbol,
                value.to_string(),
                format!("{} must be {} {}", var.description, var.domain.describe(), var.units),
            ));
        }
    }
    Ok(())
}

fn resolve(definition: &EquationDefinition, unknown: &str, known: &Bindings) -> GuideResult<Solution> {
    let equation = definition.equation;
    validate_known(definition, unknown, known)?;

    let variable = definition
        .variable(unknown)
        .ok_or_else(|| GuideError::unrecognized_variable(equation.id(), unknown))?;

    let rational = reduce(&definition.relation, unknown, known).map_err(|e| match e {
        ReduceError::Unbound(symbol) => GuideError::under_constrained(equation.id(), vec![symbol]),
        ReduceError::DivisionByZero => GuideError::no_real_solution(equation.id(), unknown),
    })?;

    let candidates = match rational.numerator.real_roots() {
        Ok(RootSet::Finite(roots)) => roots,
        Ok(RootSet::Everywhere) => {
            // Any value satisfies the relation; refuse to pick one
            return Err(GuideError::AmbiguousSolution {
                equation: equation.id().to_string(),
                unknown: unknown.to_string(),
                roots: Vec::new(),
            });
        }
        Err(degree) => {
            return Err(GuideError::UnsupportedDegree {
                equation: equation.id().to_string(),
                unknown: unknown.to_string(),
                degree,
            })
        }
    };

    let mut valid: Vec<f64> = Vec::new();
    for root in candidates {
        if !root.is_finite() || rational.is_pole(root) || !variable.domain.contains(root) {
            continue;
        }
        let duplicate = valid
            .iter()
            .any(|r| (r - root).abs() <= ROOT_MERGE_TOLERANCE * r.abs().max(root.abs()).max(1.0));
        if !duplicate {
            valid.push(root);
        }
    }

    match valid.as_slice() {
        [] => Err(GuideError::no_real_solution(equation.id(), unknown)),
        [value] => Ok(Solution {
            equation,
            unknown: unknown.to_string(),
            value: *value,
            units: variable.units,
        }),
        _ => Err(GuideError::AmbiguousSolution {
            equation: equation.id().to_string(),
            unknown: unknown.to_string(),
            roots: valid,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::registry::{Domain, ALL_EQUATIONS};
    use crate::equations::bind;
    use approx::assert_relative_eq;

    #[test]
    fn test_shear_force_from_stress_and_area() {
        let s = solve("shear-stress", &bind(&[("stress", 30000.0), ("area", 0.5)])).unwrap();
        assert_eq!(s.equation, Equation::ShearStress);
        assert_eq!(s.unknown, "force");
        assert_eq!(s.units, "lbf");
        assert_relative_eq!(s.value, 15000.0);
    }

    #[test]
    fn test_bending_moment_from_stress_and_modulus() {
        let s = solve("bending-stress", &bind(&[("stress", 20000.0), ("sectionModulus", 0.1)])).unwrap();
        assert_eq!(s.unknown, "moment");
        assert_relative_eq!(s.value, 2000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_punching_force() {
        let s = solve(
            "punching-force",
            &bind(&[("perimeter", 10.0), ("thickness", 0.05), ("shearStrength", 40000.0)]),
        )
        .unwrap();
        assert_eq!(s.unknown, "force");
        assert_relative_eq!(s.value, 20000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_section_modulus_in_denominator() {
        let s = solve("bending-stress", &bind(&[("stress", 20000.0), ("moment", 2000.0)])).unwrap();
        assert_eq!(s.unknown, "sectionModulus");
        assert_relative_eq!(s.value, 0.1, max_relative = 1e-12);
    }

    #[test]
    fn test_air_bending_thickness_takes_positive_root() {
        // F = 1.33 * 60000 * 0.1^2 * 12 / (8 * 0.8) = 1496.25
        let s = solve(
            "air-bending-force",
            &bind(&[
                ("force", 1496.25),
                ("dieFactor", 1.33),
                ("tensileStrength", 60000.0),
                ("width", 12.0),
                ("dieOpening", 0.8),
            ]),
        )
        .unwrap();
        assert_eq!(s.unknown, "thickness");
        assert_relative_eq!(s.value, 0.1, max_relative = 1e-10);
    }

    #[test]
    fn test_shear_flow_bond_width() {
        // tau = 1000 * 2 / (4 * b) = 250 => b = 2
        let s = solve(
            "shear-flow",
            &bind(&[("stress", 250.0), ("shearForce", 1000.0), ("firstMoment", 2.0), ("momentOfInertia", 4.0)]),
        )
        .unwrap();
        assert_eq!(s.unknown, "bondWidth");
        assert_relative_eq!(s.value, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_round_trip_every_equation_every_unknown() {
        let samples = [1.7, 0.35, 2.5, 12.0, 0.8, 4.25];
        for eq in ALL_EQUATIONS {
            let symbols: Vec<&str> = eq.variable_symbols().collect();
            let full: Bindings = symbols
                .iter()
                .zip(samples.iter())
                .map(|(s, v)| (s.to_string(), *v))
                .collect();

            for unknown in &symbols {
                let mut known = full.clone();
                known.remove(*unknown);
                let s = solve(eq.id(), &known)
                    .unwrap_or_else(|e| panic!("{} for {}: {}", eq.id(), unknown, e));
                assert_eq!(s.unknown, *unknown);

                known.insert(unknown.to_string(), s.value);
                let residual = eq.residual(&known).unwrap();
                assert!(
                    residual.abs() < 1e-9,
                    "{} solving {}: residual {}",
                    eq.id(),
                    unknown,
                    residual
                );
            }
        }
    }

    #[test]
    fn test_round_trip_mixed_magnitudes() {
        let samples = [1e-6, 4.2e9, 2.5e-3, 7.5e5, 130.0, 6e-4, 1e9];
        for shift in 0..samples.len() {
            for eq in ALL_EQUATIONS {
                let symbols: Vec<&str> = eq.variable_symbols().collect();
                let (first, rest) = symbols.split_first().unwrap();

                // Consistent full set: derive the first symbol from the others
                let mut full: Bindings = rest
                    .iter()
                    .enumerate()
                    .map(|(k, s)| (s.to_string(), samples[(k + shift) % samples.len()]))
                    .collect();
                let derived = solve(eq.id(), &full)
                    .unwrap_or_else(|e| panic!("{} deriving {}: {}", eq.id(), first, e));
                full.insert(first.to_string(), derived.value);

                for unknown in &symbols {
                    let mut known = full.clone();
                    known.remove(*unknown);
                    let s = solve(eq.id(), &known)
                        .unwrap_or_else(|e| panic!("{} for {} (shift {}): {}", eq.id(), unknown, shift, e));
                    assert_relative_eq!(s.value, full[*unknown], max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_large_si_values() {
        let s = solve("shear-stress", &bind(&[("stress", 4e8), ("area", 5000.0)])).unwrap();
        assert_relative_eq!(s.value, 2e12, max_relative = 1e-12);

        let s = solve("bending-stress", &bind(&[("stress", 2.5e8), ("sectionModulus", 1e5)])).unwrap();
        assert_relative_eq!(s.value, 2.5e13, max_relative = 1e-12);

        let s = solve("shear-stress", &bind(&[("force", 1e10), ("stress", 1e-3)])).unwrap();
        assert_eq!(s.unknown, "area");
        assert_relative_eq!(s.value, 1e13, max_relative = 1e-12);
    }

    #[test]
    fn test_air_bend_thickness_mixed_magnitudes() {
        // force = 1.33 * 4e8 * t^2 * 2e3 / (8 * 1e-2), t = 2e-4
        let force = 1.33 * 4e8 * 2e-4 * 2e-4 * 2e3 / (8.0 * 1e-2);
        let s = solve(
            "air-bending-force",
            &bind(&[
                ("force", force),
                ("dieFactor", 1.33),
                ("tensileStrength", 4e8),
                ("width", 2e3),
                ("dieOpening", 1e-2),
            ]),
        )
        .unwrap();
        assert_eq!(s.unknown, "thickness");
        assert_relative_eq!(s.value, 2e-4, max_relative = 1e-10);
    }

    #[test]
    fn test_over_constrained() {
        let err = solve("shear-stress", &bind(&[("force", 15000.0), ("stress", 30000.0), ("area", 0.5)])).unwrap_err();
        assert_eq!(err, GuideError::over_constrained("shear-stress"));
    }

    #[test]
    fn test_under_constrained_lists_missing_in_order() {
        let err = solve("punching-force", &bind(&[("perimeter", 10.0)])).unwrap_err();
        assert_eq!(
            err,
            GuideError::under_constrained(
                "punching-force",
                vec!["force".into(), "thickness".into(), "shearStrength".into()]
            )
        );
    }

    #[test]
    fn test_unknown_equation() {
        let err = solve("nonexistent-equation", &bind(&[("a", 1.0)])).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_EQUATION");
    }

    #[test]
    fn test_unrecognized_variable() {
        let err = solve("shear-stress", &bind(&[("stress", 1.0), ("aera", 0.5)])).unwrap_err();
        assert_eq!(err, GuideError::unrecognized_variable("shear-stress", "aera"));
    }

    #[test]
    fn test_unrecognized_checked_before_counting() {
        // Extra symbol plus all real ones: typo wins over over-constrained
        let err = solve(
            "shear-stress",
            &bind(&[("force", 1.0), ("stress", 1.0), ("area", 1.0), ("Force", 1.0)]),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "UNRECOGNIZED_VARIABLE");
    }

    #[test]
    fn test_invalid_known_values() {
        let err = solve("shear-stress", &bind(&[("stress", f64::NAN), ("area", 0.5)])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");

        let err = solve("shear-stress", &bind(&[("stress", 30000.0), ("area", -0.5)])).unwrap_err();
        assert!(matches!(err, GuideError::InvalidValue { ref variable, .. } if variable == "area"));
    }

    #[test]
    fn test_no_root_when_stress_is_zero() {
        // stress = 0 with a positive moment: no section modulus works
        let err = solve("bending-stress", &bind(&[("stress", 0.0), ("moment", 500.0)])).unwrap_err();
        assert_eq!(err, GuideError::no_real_solution("bending-stress", "sectionModulus"));
    }

    #[test]
    fn test_zero_load_is_valid_for_non_negative_unknown() {
        let s = solve("shear-stress", &bind(&[("force", 0.0), ("area", 0.5)])).unwrap();
        assert_eq!(s.value, 0.0);
        assert!(s.value.is_sign_positive());
    }

    #[test]
    fn test_zero_for_positive_unknown_has_no_solution() {
        // force = 0 forces area = 0, which is not a physical area
        let err = solve("shear-stress", &bind(&[("force", 0.0), ("stress", 100.0)])).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_SOLUTION");
        assert_eq!(Equation::ShearStress.definition().variable("area").unwrap().domain, Domain::Positive);
    }

    #[test]
    fn test_identity_is_ambiguous() {
        // stress = 0 and moment = 0: every section modulus satisfies the relation
        let err = solve("bending-stress", &bind(&[("stress", 0.0), ("moment", 0.0)])).unwrap_err();
        assert_eq!(err.error_code(), "AMBIGUOUS_SOLUTION");
    }

    #[test]
    fn test_solve_for_ignores_binding_of_unknown() {
        let s = solve_for(
            "shear-stress",
            "force",
            &bind(&[("force", 0.0), ("stress", 30000.0), ("area", 0.5)]),
        )
        .unwrap();
        assert_relative_eq!(s.value, 15000.0);
    }

    #[test]
    fn test_solve_for_missing_other_value() {
        let err = solve_for("shear-stress", "force", &bind(&[("stress", 30000.0)])).unwrap_err();
        assert_eq!(err, GuideError::under_constrained("shear-stress", vec!["area".into()]));
    }

    #[test]
    fn test_solve_for_unknown_not_in_equation() {
        let err = solve_for("shear-stress", "thickness", &bind(&[("stress", 1.0), ("area", 1.0)])).unwrap_err();
        assert_eq!(err, GuideError::unrecognized_variable("shear-stress", "thickness"));
    }

    #[test]
    fn test_solution_serializes() {
        let s = solve("shear", &bind(&[("stress", 30000.0), ("area", 0.5)])).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["equation"], "shear-stress");
        assert_eq!(json["unknown"], "force");
        assert_eq!(json["value"], 15000.0);
    }
}
