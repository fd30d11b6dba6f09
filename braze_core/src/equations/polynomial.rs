//! # Single-Variable Reduction
//!
//! Reduces an [`Expr`] with one unknown into a rational function
//! `N(x) / D(x)` after substituting every known value, and finds the real
//! roots of low-degree polynomials in closed form.
//!
//! All catalog relations are products, quotients and integer powers of their
//! variables, so the numerator is at most quadratic in any single unknown.

use super::expr::Expr;
use super::Bindings;

/// A coefficient whose magnitude falls below this fraction of the terms summed
/// into it is cancellation noise and treated as zero
const RELATIVE_EPSILON: f64 = 1e-12;

/// Dense polynomial in one variable; `coeffs[i]` multiplies `x^i`.
///
/// `mags[i]` is the sum of absolute values of every product that was added
/// into `coeffs[i]`. A coefficient is only negligible relative to its own
/// inputs, never relative to the other coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
    mags: Vec<f64>,
}

/// Real roots of a polynomial.
#[derive(Debug, Clone, PartialEq)]
pub enum RootSet {
    /// The polynomial is identically zero: every value is a root
    Everywhere,
    /// Finite set of real roots, ascending
    Finite(Vec<f64>),
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        let mags = coeffs.iter().map(|c| c.abs()).collect();
        Polynomial { coeffs, mags }
    }

    pub fn constant(c: f64) -> Self {
        Polynomial::new(vec![c])
    }

    /// The monomial `x`
    pub fn x() -> Self {
        Polynomial::new(vec![0.0, 1.0])
    }

    fn zero() -> Self {
        Polynomial::new(Vec::new())
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    fn is_negligible(&self, i: usize) -> bool {
        self.coeffs[i].abs() <= RELATIVE_EPSILON * self.mags[i]
    }

    /// Copy with leading coefficients that cancelled to zero removed.
    pub fn trimmed(&self) -> Polynomial {
        let mut len = self.coeffs.len();
        while len > 0 && self.is_negligible(len - 1) {
            len -= 1;
        }
        Polynomial {
            coeffs: self.coeffs[..len].to_vec(),
            mags: self.mags[..len].to_vec(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.trimmed().coeffs.is_empty()
    }

    /// Degree after trimming; `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.trimmed().coeffs.len().checked_sub(1)
    }

    /// Horner evaluation
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Sum of the absolute values of the terms at `x`
    fn eval_abs(&self, x: f64) -> f64 {
        let x = x.abs();
        self.coeffs
            .iter()
            .zip(&self.mags)
            .rev()
            .fold(0.0, |acc, (c, m)| acc * x + c.abs().max(*m))
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let at = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0);
        Polynomial {
            coeffs: (0..len).map(|i| at(&self.coeffs, i) + at(&other.coeffs, i)).collect(),
            mags: (0..len).map(|i| at(&self.mags, i) + at(&other.mags, i)).collect(),
        }
    }

    pub fn neg(&self) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
            mags: self.mags.clone(),
        }
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        if self.coeffs.is_empty() || other.coeffs.is_empty() {
            return Polynomial::zero();
        }
        let len = self.coeffs.len() + other.coeffs.len() - 1;
        let mut coeffs = vec![0.0; len];
        let mut mags = vec![0.0; len];
        for (i, (a, ma)) in self.coeffs.iter().zip(&self.mags).enumerate() {
            for (j, (b, mb)) in other.coeffs.iter().zip(&other.mags).enumerate() {
                coeffs[i + j] += a * b;
                mags[i + j] += ma * mb;
            }
        }
        Polynomial { coeffs, mags }
    }

    fn powi(&self, n: u32) -> Polynomial {
        (0..n).fold(Polynomial::constant(1.0), |acc, _| acc.mul(self))
    }

    /// Real roots for degree <= 2.
    ///
    /// Returns `Err(degree)` for higher degrees.
    pub fn real_roots(&self) -> Result<RootSet, usize> {
        let p = self.trimmed();
        let roots = match p.coeffs.as_slice() {
            [] => return Ok(RootSet::Everywhere),
            [_] => Vec::new(),
            [c, b] => vec![-c / b],
            [c, b, a] => quadratic_roots(*a, *b, *c),
            _ => return Err(p.coeffs.len() - 1),
        };
        let mut roots: Vec<f64> = roots.into_iter().map(|r| r + 0.0).collect();
        roots.sort_by(|a, b| a.total_cmp(b));
        Ok(RootSet::Finite(roots))
    }
}

/// Roots of `a x^2 + b x + c` using the cancellation-free form.
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let mut disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        let scale = b * b + (4.0 * a * c).abs();
        if disc.abs() > RELATIVE_EPSILON * scale {
            return Vec::new();
        }
        disc = 0.0;
    }
    if disc == 0.0 {
        return vec![-b / (2.0 * a)];
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    vec![q / a, c / q]
}

/// `numerator / denominator` in the unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Rational {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

/// Why an expression could not be reduced.
#[derive(Debug, Clone, PartialEq)]
pub enum ReduceError {
    /// A symbol other than the unknown has no value
    Unbound(String),
    /// A divisor reduces to zero for every value of the unknown
    DivisionByZero,
}

impl Rational {
    fn from_poly(p: Polynomial) -> Self {
        Rational {
            numerator: p,
            denominator: Polynomial::constant(1.0),
        }
    }

    fn add(&self, other: &Rational) -> Rational {
        Rational {
            numerator: self
                .numerator
                .mul(&other.denominator)
                .add(&other.numerator.mul(&self.denominator)),
            denominator: self.denominator.mul(&other.denominator),
        }
    }

    fn neg(&self) -> Rational {
        Rational {
            numerator: self.numerator.neg(),
            denominator: self.denominator.clone(),
        }
    }

    fn mul(&self, other: &Rational) -> Rational {
        Rational {
            numerator: self.numerator.mul(&other.numerator),
            denominator: self.denominator.mul(&other.denominator),
        }
    }

    fn recip(&self) -> Result<Rational, ReduceError> {
        if self.numerator.is_zero() {
            return Err(ReduceError::DivisionByZero);
        }
        Ok(Rational {
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
        })
    }

    /// Whether `x` makes the denominator vanish
    pub fn is_pole(&self, x: f64) -> bool {
        self.denominator.eval(x).abs() <= RELATIVE_EPSILON * self.denominator.eval_abs(x)
    }
}

/// Substitute `known` into `expr` and reduce it to a rational function of `unknown`.
pub fn reduce(expr: &Expr, unknown: &str, known: &Bindings) -> Result<Rational, ReduceError> {
    Ok(match expr {
        Expr::Const(c) => Rational::from_poly(Polynomial::constant(*c)),
        Expr::Var(name) if name == unknown => Rational::from_poly(Polynomial::x()),
        Expr::Var(name) => match known.get(name) {
            Some(value) => Rational::from_poly(Polynomial::constant(*value)),
            None => return Err(ReduceError::Unbound(name.clone())),
        },
        Expr::Add(a, b) => reduce(a, unknown, known)?.add(&reduce(b, unknown, known)?),
        Expr::Sub(a, b) => reduce(a, unknown, known)?.add(&reduce(b, unknown, known)?.neg()),
        Expr::Mul(a, b) => reduce(a, unknown, known)?.mul(&reduce(b, unknown, known)?),
        Expr::Div(a, b) => reduce(a, unknown, known)?.mul(&reduce(b, unknown, known)?.recip()?),
        Expr::Neg(a) => reduce(a, unknown, known)?.neg(),
        Expr::Pow(base, n) => {
            let base = reduce(base, unknown, known)?;
            let base = if *n < 0 { base.recip()? } else { base };
            let n = n.unsigned_abs();
            Rational {
                numerator: base.numerator.powi(n),
                denominator: base.denominator.powi(n),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::bind;
    use approx::assert_relative_eq;

    fn finite(set: RootSet) -> Vec<f64> {
        match set {
            RootSet::Finite(roots) => roots,
            RootSet::Everywhere => panic!("expected finite roots"),
        }
    }

    #[test]
    fn test_linear_root() {
        // 3x - 6 = 0
        let p = Polynomial::new(vec![-6.0, 3.0]);
        assert_eq!(finite(p.real_roots().unwrap()), vec![2.0]);
    }

    #[test]
    fn test_constant_has_no_roots() {
        let p = Polynomial::constant(4.0);
        assert_eq!(p.real_roots().unwrap(), RootSet::Finite(vec![]));
    }

    #[test]
    fn test_zero_polynomial_roots_everywhere() {
        let p = Polynomial::new(vec![0.0, 0.0]);
        assert_eq!(p.real_roots().unwrap(), RootSet::Everywhere);
        assert_eq!(p.degree(), None);
    }

    #[test]
    fn test_quadratic_two_roots_sorted() {
        // x^2 - 4 = 0
        let p = Polynomial::new(vec![-4.0, 0.0, 1.0]);
        let roots = finite(p.real_roots().unwrap());
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], -2.0);
        assert_relative_eq!(roots[1], 2.0);
    }

    #[test]
    fn test_quadratic_double_root() {
        // (x - 3)^2 = x^2 - 6x + 9
        let p = Polynomial::new(vec![9.0, -6.0, 1.0]);
        assert_eq!(finite(p.real_roots().unwrap()), vec![3.0]);
    }

    #[test]
    fn test_quadratic_complex_roots() {
        // x^2 + 1 = 0
        let p = Polynomial::new(vec![1.0, 0.0, 1.0]);
        assert!(finite(p.real_roots().unwrap()).is_empty());
    }

    #[test]
    fn test_quadratic_stable_small_root() {
        // x^2 - 1e8 x + 1 = 0 has a root near 1e-8
        let p = Polynomial::new(vec![1.0, -1e8, 1.0]);
        let roots = finite(p.real_roots().unwrap());
        assert_relative_eq!(roots[0], 1e-8, max_relative = 1e-9);
        assert_relative_eq!(roots[1], 1e8, max_relative = 1e-9);
    }

    #[test]
    fn test_cubic_unsupported() {
        let p = Polynomial::new(vec![1.0, 0.0, 0.0, 2.0]);
        assert_eq!(p.real_roots(), Err(3));
    }

    #[test]
    fn test_trim_cancelled_leading_terms() {
        // (x^2 + x + 2) - x^2
        let p = Polynomial::new(vec![2.0, 1.0, 1.0]).sub(&Polynomial::new(vec![0.0, 0.0, 1.0]));
        assert_eq!(p.degree(), Some(1));
        assert_eq!(finite(p.real_roots().unwrap()), vec![-2.0]);
    }

    #[test]
    fn test_small_leading_coefficient_kept() {
        // 2e12 - 1e-3 x: a tiny slope beside a large constant means a large root
        let p = Polynomial::new(vec![2e12, -1e-3]);
        assert_eq!(p.degree(), Some(1));
        let roots = finite(p.real_roots().unwrap());
        assert_relative_eq!(roots[0], 2e15, max_relative = 1e-12);
    }

    #[test]
    fn test_small_leading_coefficient_from_products_kept() {
        // 4e8 * 5000 - x
        let p = Polynomial::constant(4e8)
            .mul(&Polynomial::constant(5000.0))
            .sub(&Polynomial::x());
        assert_eq!(finite(p.real_roots().unwrap()), vec![2e12]);
    }

    #[test]
    fn test_reduce_quotient() {
        // stress - moment / S, solving for S with stress = 20000, moment = 2000
        let expr = Expr::var("stress") - Expr::var("moment") / Expr::var("S");
        let r = reduce(&expr, "S", &bind(&[("stress", 20000.0), ("moment", 2000.0)])).unwrap();
        let roots = finite(r.numerator.real_roots().unwrap());
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 0.1);
        assert!(!r.is_pole(roots[0]));
    }

    #[test]
    fn test_reduce_square() {
        let expr = Expr::var("F") - Expr::var("k") * Expr::var("t").powi(2);
        let r = reduce(&expr, "t", &bind(&[("F", 8.0), ("k", 2.0)])).unwrap();
        assert_eq!(r.numerator.degree(), Some(2));
    }

    #[test]
    fn test_reduce_unbound_symbol() {
        let expr = Expr::var("a") * Expr::var("b");
        let err = reduce(&expr, "a", &bind(&[])).unwrap_err();
        assert_eq!(err, ReduceError::Unbound("b".to_string()));
    }

    #[test]
    fn test_reduce_division_by_zero() {
        let expr = Expr::var("a") / Expr::var("b");
        let err = reduce(&expr, "a", &bind(&[("b", 0.0)])).unwrap_err();
        assert_eq!(err, ReduceError::DivisionByZero);
    }

    #[test]
    fn test_reduce_large_and_small_magnitudes() {
        // stress - moment / S with SI-sized values, solving for moment
        let expr = Expr::var("stress") - Expr::var("moment") / Expr::var("S");
        let r = reduce(&expr, "moment", &bind(&[("stress", 2.5e8), ("S", 1e5)])).unwrap();
        let roots = finite(r.numerator.real_roots().unwrap());
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 2.5e13, max_relative = 1e-12);
    }

    #[test]
    fn test_pole_detection() {
        // 1 / x has a pole at zero
        let expr = Expr::constant(1.0) / Expr::var("x");
        let r = reduce(&expr, "x", &bind(&[])).unwrap();
        assert!(r.is_pole(0.0));
        assert!(!r.is_pole(1.0));
        assert!(!r.is_pole(1e-30));
    }
}
