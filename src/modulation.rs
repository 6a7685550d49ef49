//! Time-varying scalar expressions.
//!
//! A [`Modulation`] is a small immutable expression tree producing a scalar
//! from a time value: constants, the ambient time itself, and unary, binary
//! and ternary operators over sub-expressions. Trees are built once from a
//! declarative description (the node-editor collaborator deserializes JSON
//! into these constructors) and re-evaluated every animation frame; there is
//! no caching, an `N`-node tree costs `O(N)` per call.
//!
//! Operators form closed enums, so evaluation is a single exhaustive match
//! and an unknown operator name is a construction-time
//! [`ModulationError`], never a runtime surprise.
//!
//! Evaluation takes the clock explicitly: [`Modulation::eval`] reads the
//! ambient time from a [`Clock`], and [`Modulation::eval_at`] substitutes an
//! explicit time, passed uniformly to every descendant.
//!
//! # Example
//!
//! ```
//! use strange::modulation::Modulation;
//! use strange::time::Clock;
//!
//! // 2 + 3 * sin(t)
//! let signal = Modulation::binary(
//!     "add",
//!     2.0,
//!     Modulation::binary("mul", 3.0, Modulation::unary("sin", Modulation::now()).unwrap()).unwrap(),
//! )
//! .unwrap();
//!
//! let mut clock = Clock::new(0.0, 0.1);
//! assert_eq!(signal.eval(&clock), 2.0);
//! clock.tick();
//! assert!((signal.eval(&clock) - (2.0 + 3.0 * 0.1f64.sin())).abs() < 1e-12);
//! ```

use crate::error::ModulationError;
use crate::time::Clock;

/// Unary scalar functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Sin,
    /// sin²
    Sin2,
    Cos,
    /// cos²
    Cos2,
    Exp,
    Log,
    Abs,
    Floor,
    Ceil,
    Sinh,
    Cosh,
}

impl UnaryOp {
    /// Look up an operator by its description name.
    pub fn from_name(name: &str) -> Result<Self, ModulationError> {
        match name {
            "sin" => Ok(UnaryOp::Sin),
            "sin2" => Ok(UnaryOp::Sin2),
            "cos" => Ok(UnaryOp::Cos),
            "cos2" => Ok(UnaryOp::Cos2),
            "exp" => Ok(UnaryOp::Exp),
            "log" => Ok(UnaryOp::Log),
            "abs" => Ok(UnaryOp::Abs),
            "floor" => Ok(UnaryOp::Floor),
            "ceil" => Ok(UnaryOp::Ceil),
            "sinh" => Ok(UnaryOp::Sinh),
            "cosh" => Ok(UnaryOp::Cosh),
            _ => Err(ModulationError::UnknownOperator { arity: "unary", name: name.to_string() }),
        }
    }

    /// Apply the function.
    pub fn apply(self, a: f64) -> f64 {
        match self {
            UnaryOp::Sin => a.sin(),
            UnaryOp::Sin2 => a.sin() * a.sin(),
            UnaryOp::Cos => a.cos(),
            UnaryOp::Cos2 => a.cos() * a.cos(),
            UnaryOp::Exp => a.exp(),
            UnaryOp::Log => a.ln(),
            UnaryOp::Abs => a.abs(),
            UnaryOp::Floor => a.floor(),
            UnaryOp::Ceil => a.ceil(),
            UnaryOp::Sinh => a.sinh(),
            UnaryOp::Cosh => a.cosh(),
        }
    }
}

/// Binary scalar functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Min,
    Max,
    Pow,
}

impl BinaryOp {
    /// Look up an operator by its description name.
    pub fn from_name(name: &str) -> Result<Self, ModulationError> {
        match name {
            "add" => Ok(BinaryOp::Add),
            "sub" => Ok(BinaryOp::Sub),
            "mul" => Ok(BinaryOp::Mul),
            "div" => Ok(BinaryOp::Div),
            "min" => Ok(BinaryOp::Min),
            "max" => Ok(BinaryOp::Max),
            "pow" => Ok(BinaryOp::Pow),
            _ => Err(ModulationError::UnknownOperator { arity: "binary", name: name.to_string() }),
        }
    }

    /// Apply the function.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Min => a.min(b),
            BinaryOp::Max => a.max(b),
            BinaryOp::Pow => a.powf(b),
        }
    }
}

/// Ternary scalar functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TernaryOp {
    /// Linear interpolation: `a * (1 - t) + b * t`.
    Mix,
}

impl TernaryOp {
    /// Look up an operator by its description name.
    pub fn from_name(name: &str) -> Result<Self, ModulationError> {
        match name {
            "mix" => Ok(TernaryOp::Mix),
            _ => Err(ModulationError::UnknownOperator { arity: "ternary", name: name.to_string() }),
        }
    }

    /// Apply the function.
    pub fn apply(self, a: f64, b: f64, t: f64) -> f64 {
        match self {
            TernaryOp::Mix => a * (1.0 - t) + b * t,
        }
    }
}

/// A time-dependent scalar expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Modulation {
    /// A fixed value, independent of time.
    Constant(f64),
    /// The evaluation time itself.
    Now,
    Unary(UnaryOp, Box<Modulation>),
    Binary(BinaryOp, Box<Modulation>, Box<Modulation>),
    Ternary(TernaryOp, Box<Modulation>, Box<Modulation>, Box<Modulation>),
}

impl Modulation {
    /// A constant node.
    pub fn constant(value: f64) -> Self {
        Modulation::Constant(value)
    }

    /// The ambient-time node.
    pub fn now() -> Self {
        Modulation::Now
    }

    /// A named unary operator applied to one operand.
    ///
    /// Operands accept raw numbers as well as nodes.
    pub fn unary(name: &str, a: impl Into<Modulation>) -> Result<Self, ModulationError> {
        Ok(Modulation::Unary(UnaryOp::from_name(name)?, Box::new(a.into())))
    }

    /// A named binary operator applied to two operands.
    pub fn binary(
        name: &str,
        a: impl Into<Modulation>,
        b: impl Into<Modulation>,
    ) -> Result<Self, ModulationError> {
        Ok(Modulation::Binary(
            BinaryOp::from_name(name)?,
            Box::new(a.into()),
            Box::new(b.into()),
        ))
    }

    /// A named ternary operator applied to three operands.
    pub fn ternary(
        name: &str,
        a: impl Into<Modulation>,
        b: impl Into<Modulation>,
        t: impl Into<Modulation>,
    ) -> Result<Self, ModulationError> {
        Ok(Modulation::Ternary(
            TernaryOp::from_name(name)?,
            Box::new(a.into()),
            Box::new(b.into()),
            Box::new(t.into()),
        ))
    }

    /// Evaluate at the clock's current ambient time.
    pub fn eval(&self, clock: &Clock) -> f64 {
        self.eval_at(clock.time())
    }

    /// Evaluate at an explicit time, passed uniformly to all descendants.
    pub fn eval_at(&self, t: f64) -> f64 {
        match self {
            Modulation::Constant(value) => *value,
            Modulation::Now => t,
            Modulation::Unary(op, a) => op.apply(a.eval_at(t)),
            Modulation::Binary(op, a, b) => op.apply(a.eval_at(t), b.eval_at(t)),
            Modulation::Ternary(op, a, b, c) => {
                op.apply(a.eval_at(t), b.eval_at(t), c.eval_at(t))
            }
        }
    }
}

impl From<f64> for Modulation {
    fn from(value: f64) -> Self {
        Modulation::Constant(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_ignores_time() {
        let node = Modulation::constant(5.0);
        assert_eq!(node.eval_at(0.0), 5.0);
        assert_eq!(node.eval_at(123.0), 5.0);
        assert_eq!(node.eval(&Clock::new(7.0, 1.0)), 5.0);
    }

    #[test]
    fn test_binary_add_of_raw_numbers() {
        let node = Modulation::binary("add", 2.0, 3.0).unwrap();
        assert_eq!(node.eval_at(0.0), 5.0);
    }

    #[test]
    fn test_unary_sin_of_zero() {
        let node = Modulation::unary("sin", 0.0).unwrap();
        assert_eq!(node.eval_at(0.0), 0.0);
    }

    #[test]
    fn test_ternary_mix_midpoint() {
        let node = Modulation::ternary("mix", 0.0, 10.0, 0.5).unwrap();
        assert_eq!(node.eval_at(0.0), 5.0);
    }

    #[test]
    fn test_now_tracks_clock_without_rebuilding() {
        let node = Modulation::binary("mul", 2.0, Modulation::now()).unwrap();
        let mut clock = Clock::new(0.0, 0.5);

        assert_eq!(node.eval(&clock), 0.0);
        clock.tick();
        assert_eq!(node.eval(&clock), 1.0);
        clock.tick();
        assert_eq!(node.eval(&clock), 2.0);
    }

    #[test]
    fn test_explicit_time_reaches_every_descendant() {
        // mix(t, sin(t), 0.5) at t = 2: both branches see the same override
        let node =
            Modulation::ternary("mix", Modulation::now(), Modulation::unary("sin", Modulation::now()).unwrap(), 0.5)
                .unwrap();
        let expected = 2.0 * 0.5 + 2.0f64.sin() * 0.5;
        assert!((node.eval_at(2.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_operator_table() {
        assert_eq!(Modulation::unary("cos", 0.0).unwrap().eval_at(0.0), 1.0);
        assert_eq!(Modulation::unary("abs", -3.0).unwrap().eval_at(0.0), 3.0);
        assert_eq!(Modulation::unary("floor", 1.7).unwrap().eval_at(0.0), 1.0);
        assert_eq!(Modulation::unary("ceil", 1.2).unwrap().eval_at(0.0), 2.0);
        assert_eq!(Modulation::unary("sin2", std::f64::consts::FRAC_PI_2).unwrap().eval_at(0.0), 1.0);
        assert_eq!(Modulation::binary("sub", 5.0, 2.0).unwrap().eval_at(0.0), 3.0);
        assert_eq!(Modulation::binary("div", 6.0, 3.0).unwrap().eval_at(0.0), 2.0);
        assert_eq!(Modulation::binary("min", 1.0, 2.0).unwrap().eval_at(0.0), 1.0);
        assert_eq!(Modulation::binary("max", 1.0, 2.0).unwrap().eval_at(0.0), 2.0);
        assert_eq!(Modulation::binary("pow", 2.0, 10.0).unwrap().eval_at(0.0), 1024.0);
    }

    #[test]
    fn test_unknown_operator_fails_at_construction() {
        let err = Modulation::unary("tan", 0.0).unwrap_err();
        assert_eq!(
            err,
            ModulationError::UnknownOperator { arity: "unary", name: "tan".to_string() }
        );

        assert!(Modulation::binary("mod", 1.0, 2.0).is_err());
        assert!(Modulation::ternary("clamp", 1.0, 2.0, 3.0).is_err());
    }
}
