//! # Symbolic Expressions
//!
//! A small expression tree for the catalog relations. Relations are written
//! with ordinary Rust operators:
//!
//! ```rust
//! use braze_core::equations::expr::Expr;
//!
//! let relation = Expr::var("force") - Expr::var("stress") * Expr::var("area");
//! assert_eq!(relation.to_string(), "force - stress * area");
//! assert_eq!(relation.symbols(), vec!["force", "stress", "area"]);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Bindings;

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Const(f64),
    /// Named variable
    Var(String),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    /// Integer power
    Pow(Box<Expr>, i32),
}

impl Expr {
    pub fn var(symbol: impl Into<String>) -> Self {
        Expr::Var(symbol.into())
    }

    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    /// Raise to an integer power
    pub fn powi(self, exponent: i32) -> Self {
        Expr::Pow(Box::new(self), exponent)
    }

    /// Variable symbols in order of first appearance (left to right).
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
            Expr::Neg(a) | Expr::Pow(a, _) => a.collect_symbols(out),
        }
    }

    /// Evaluate with every variable bound.
    ///
    /// Returns `None` if a symbol has no binding. Division by zero follows
    /// IEEE semantics.
    pub fn eval(&self, bindings: &Bindings) -> Option<f64> {
        Some(match self {
            Expr::Const(c) => *c,
            Expr::Var(name) => *bindings.get(name)?,
            Expr::Add(a, b) => a.eval(bindings)? + b.eval(bindings)?,
            Expr::Sub(a, b) => a.eval(bindings)? - b.eval(bindings)?,
            Expr::Mul(a, b) => a.eval(bindings)? * b.eval(bindings)?,
            Expr::Div(a, b) => a.eval(bindings)? / b.eval(bindings)?,
            Expr::Neg(a) => -a.eval(bindings)?,
            Expr::Pow(a, n) => a.eval(bindings)?.powi(*n),
        })
    }

    /// Binding strength used for parenthesization when printing
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Pow(..) => 4,
            Expr::Const(c) if *c < 0.0 => 3,
            Expr::Const(_) | Expr::Var(_) => 5,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, needs_parens: bool) -> fmt::Result {
    if needs_parens {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        match self {
            Expr::Const(c) => {
                if c.fract() == 0.0 && c.abs() < 1e15 {
                    write!(f, "{}", *c as i64)
                } else {
                    write!(f, "{}", c)
                }
            }
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                let op = match self {
                    Expr::Add(..) => "+",
                    Expr::Sub(..) => "-",
                    Expr::Mul(..) => "*",
                    _ => "/",
                };
                // Right operand of `-` and `/` needs parens at equal precedence
                let non_associative = matches!(self, Expr::Sub(..) | Expr::Div(..));
                write_operand(f, a, a.precedence() < prec)?;
                write!(f, " {} ", op)?;
                let right_prec = b.precedence();
                write_operand(f, b, right_prec < prec || (non_associative && right_prec == prec))
            }
            Expr::Neg(a) => {
                write!(f, "-")?;
                write_operand(f, a, a.precedence() < prec)
            }
            Expr::Pow(base, n) => {
                write_operand(f, base, base.precedence() <= prec)?;
                if *n < 0 {
                    write!(f, "^({})", n)
                } else {
                    write!(f, "^{}", n)
                }
            }
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::bind;

    fn v(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn test_display_precedence() {
        let e = v("a") - v("b") * v("c");
        assert_eq!(e.to_string(), "a - b * c");

        let e = (v("a") - v("b")) * v("c");
        assert_eq!(e.to_string(), "(a - b) * c");

        let e = v("a") / (v("b") * v("c"));
        assert_eq!(e.to_string(), "a / (b * c)");

        let e = v("a") - (v("b") - v("c"));
        assert_eq!(e.to_string(), "a - (b - c)");

        let e = (v("a") + v("b")).powi(2);
        assert_eq!(e.to_string(), "(a + b)^2");
    }

    #[test]
    fn test_display_constants() {
        let e = Expr::constant(8.0) * v("d");
        assert_eq!(e.to_string(), "8 * d");

        let e = Expr::constant(1.33) * v("k");
        assert_eq!(e.to_string(), "1.33 * k");
    }

    #[test]
    fn test_symbols_deduplicated_in_order() {
        let e = v("x") * v("y") + v("x").powi(2) - v("z");
        assert_eq!(e.symbols(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_eval() {
        let e = v("k") * v("t").powi(2) / (Expr::constant(8.0) * v("d"));
        let b = bind(&[("k", 1.33), ("t", 0.1), ("d", 0.5)]);
        let value = e.eval(&b).unwrap();
        assert!((value - 1.33 * 0.01 / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_eval_unbound_symbol() {
        let e = v("a") + v("b");
        assert_eq!(e.eval(&bind(&[("a", 1.0)])), None);
    }
}
