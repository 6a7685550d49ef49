//! Error types for strange.
//!
//! This module provides error types for parameter updates, adaptive
//! integration, and modulation tree construction.

use std::fmt;

/// Errors that can occur when updating a system's parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The update names a parameter the system does not have.
    Unknown {
        /// Name of the system rejecting the update.
        system: &'static str,
        /// The offending parameter name.
        name: String,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::Unknown { system, name } => {
                write!(f, "system '{}' has no parameter named '{}'", system, name)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors that can occur while advancing an adaptive integration step.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// The error estimate never dropped below the tolerance within the
    /// configured number of step-rejection retries.
    Diverged {
        /// How many trial steps were rejected before giving up.
        rejections: u32,
        /// Step size at the last rejected attempt.
        step_size: f64,
    },
    /// Step rejection shrank the step size below the configured floor.
    StepUnderflow {
        /// The step size that fell below the floor.
        step_size: f64,
        /// The configured minimum step size.
        min_step: f64,
    },
    /// The derivative produced NaN or infinity.
    NonFinite {
        /// Time of the last accepted state when instability was detected.
        t: f64,
    },
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationError::Diverged { rejections, step_size } => write!(
                f,
                "integration diverged: {} rejected steps without meeting tolerance (h = {:e})",
                rejections, step_size
            ),
            IntegrationError::StepUnderflow { step_size, min_step } => write!(
                f,
                "step size underflow: h = {:e} fell below the minimum of {:e}",
                step_size, min_step
            ),
            IntegrationError::NonFinite { t } => write!(
                f,
                "numerical instability: derivative produced a non-finite value near t = {}",
                t
            ),
        }
    }
}

impl std::error::Error for IntegrationError {}

/// Errors that can occur while building a modulation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ModulationError {
    /// The description names an operator that does not exist.
    UnknownOperator {
        /// Operator arity ("unary", "binary" or "ternary").
        arity: &'static str,
        /// The unrecognized operator name.
        name: String,
    },
}

impl fmt::Display for ModulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModulationError::UnknownOperator { arity, name } => {
                write!(f, "unknown {} operator '{}'", arity, name)
            }
        }
    }
}

impl std::error::Error for ModulationError {}
