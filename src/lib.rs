//! # strange - chaotic attractor engine
//!
//! Adaptive ODE integration and shader-source generation for interactive
//! visualization of chaotic dynamical systems.
//!
//! The crate is driven by an external animation loop: every frame it can
//! advance CPU-side trajectories with an error-controlled Runge-Kutta-
//! Fehlberg 4(5) step, evaluate time-varying parameter expressions, and hand
//! the renderer both the advanced states and the shader source / uniform
//! bytes the GPU particle path consumes.
//!
//! ## Quick Start
//!
//! ```
//! use strange::prelude::*;
//!
//! let lorenz = Lorenz::default();
//! let mut rk = RungeKuttaIntegrator::new(lorenz, &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-6);
//!
//! for _ in 0..100 {
//!     let (t, x) = rk.step().unwrap();
//!     // hand (t, x) to your particle / trace visualizer
//!     assert!(t > 0.0 && x[0].is_finite());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Systems
//!
//! An [`OdeSystem`] is a closed-form 3D vector field with named scalar
//! parameters: [`Lorenz`], [`Roessler`], [`Thomas`] and [`ModifiedChua`].
//! Each carries one authoritative mathematical definition to two execution
//! targets: a CPU derivative for the adaptive integrator and a GLSL
//! `vec3 xdot(vec3 x)` chunk for the GPU ping-pong pass. Parameters are
//! edited live through merge-style updates ([`OdeSystem::set_parameters`]).
//!
//! ### Integration
//!
//! [`RungeKuttaIntegrator`] owns one trajectory. Every
//! [`step`](integration::RungeKuttaIntegrator::step) returns exactly one
//! accepted step whose local truncation error is at or below the tolerance;
//! rejected trial steps are retried internally with a smaller step size,
//! bounded so degenerate inputs fail fast instead of hanging the frame.
//!
//! ### Modulations
//!
//! A [`Modulation`] is a small expression tree over time (constants, the
//! ambient clock, and closed unary/binary/ternary operator enums), evaluated
//! once per frame to drive parameters and uniforms. The ambient [`Clock`] is
//! explicit and per-session: `tick()` it once per frame, before evaluating.
//!
//! ### Shader assembly
//!
//! [`shader`] builds the full-screen-quad GLSL sources for the external
//! compute collaborator; [`params::Parameters`] carries name/value mappings
//! between systems, UI, and the uniform uploader.

pub mod error;
pub mod integration;
pub mod modulation;
pub mod params;
pub mod shader;
pub mod systems;
pub mod time;

pub use error::{IntegrationError, ModulationError, ParameterError};
pub use glam::DVec3;
pub use integration::RungeKuttaIntegrator;
pub use modulation::{BinaryOp, Modulation, TernaryOp, UnaryOp};
pub use params::Parameters;
pub use systems::{FieldFn, Lorenz, ModifiedChua, OdeSystem, Roessler, Thomas, VectorField};
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```
/// use strange::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{IntegrationError, ModulationError, ParameterError};
    pub use crate::integration::RungeKuttaIntegrator;
    pub use crate::modulation::{BinaryOp, Modulation, TernaryOp, UnaryOp};
    pub use crate::params::Parameters;
    pub use crate::shader::{build_fragment_shader, build_fragment_shader_baked};
    pub use crate::systems::{
        FieldFn, Lorenz, ModifiedChua, OdeSystem, Roessler, Thomas, VectorField,
    };
    pub use crate::time::Clock;
    pub use glam::DVec3;
}
