//! Chaotic ODE systems.
//!
//! Each system is a closed-form 3D vector field with named scalar
//! parameters. The same mathematical definition is carried to two execution
//! targets: a CPU derivative ([`VectorField::eval`]) consumed by the adaptive
//! integrator, and a GLSL `vec3 xdot(vec3 x)` body consumed by the shader
//! collaborator. Parameters are read as a full [`Parameters`] mapping and
//! updated live with merge semantics.
//!
//! # Systems
//!
//! | System | Parameters | Character |
//! |--------|------------|-----------|
//! | [`Lorenz`] | sigma, rho, beta | the classic butterfly |
//! | [`Roessler`] | a, b, c | single-scroll band |
//! | [`Thomas`] | b | cyclically symmetric |
//! | [`ModifiedChua`] | alpha, beta, a, b, c, d | multi-scroll, piecewise sine |

use glam::DVec3;

use crate::error::ParameterError;
use crate::params::Parameters;

/// A first-order ODE right-hand side: `xdot = f(t, x)`.
///
/// Implementations write the derivative into the caller-supplied buffer and
/// allocate nothing; the integrator calls this six times per trial step.
pub trait VectorField {
    /// Dimension of the state vector.
    fn dim(&self) -> usize;

    /// Evaluate the derivative at `(t, x)`, writing into `xdot`.
    fn eval(&self, t: f64, x: &[f64], xdot: &mut [f64]);
}

/// Adapts a plain closure into a [`VectorField`].
///
/// # Example
///
/// ```
/// use strange::systems::{FieldFn, VectorField};
///
/// // Simple harmonic oscillator
/// let field = FieldFn::new(2, |_t, x: &[f64], xdot: &mut [f64]| {
///     xdot[0] = x[1];
///     xdot[1] = -x[0];
/// });
///
/// let mut xdot = [0.0; 2];
/// field.eval(0.0, &[1.0, 0.0], &mut xdot);
/// assert_eq!(xdot, [0.0, -1.0]);
/// ```
pub struct FieldFn<F> {
    dim: usize,
    f: F,
}

impl<F> FieldFn<F>
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    /// Wrap a derivative closure operating on `dim`-dimensional states.
    pub fn new(dim: usize, f: F) -> Self {
        Self { dim, f }
    }
}

impl<F> VectorField for FieldFn<F>
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn eval(&self, t: f64, x: &[f64], xdot: &mut [f64]) {
        (self.f)(t, x, xdot)
    }
}

/// A named chaotic system with live-editable parameters and a shader form.
///
/// The GLSL body returned by [`OdeSystem::glsl_body`] is the single
/// authoritative shader-side definition; [`OdeSystem::shader_chunk`] prefixes
/// it with `uniform float` declarations matching [`OdeSystem::parameters`],
/// while [`OdeSystem::shader_chunk_baked`] bakes the current values in as
/// constants instead.
pub trait OdeSystem: VectorField {
    /// Short lowercase identifier ("lorenz", "roessler", ...).
    fn name(&self) -> &'static str;

    /// Current parameter values as a full mapping.
    fn parameters(&self) -> Parameters;

    /// Merge a partial parameter update.
    ///
    /// Names absent from `update` keep their previous values. An explicit
    /// `0.0` is a real value. Unknown names are rejected; values named
    /// before the offending key are already applied when the error returns.
    fn set_parameters(&mut self, update: &Parameters) -> Result<(), ParameterError>;

    /// GLSL source defining `vec3 xdot(vec3 x)` in terms of the parameter
    /// names, without any parameter declarations.
    fn glsl_body(&self) -> &'static str;

    /// Shader chunk with parameters declared as uniforms.
    fn shader_chunk(&self) -> String {
        format!("{}\n\n{}", self.parameters().to_glsl_uniforms(), self.glsl_body())
    }

    /// Shader chunk with the current parameter values baked in as constants.
    fn shader_chunk_baked(&self) -> String {
        format!("{}\n\n{}", self.parameters().to_glsl_consts(), self.glsl_body())
    }
}

/// The Lorenz system, discovered in 1963 while modeling atmospheric
/// convection.
///
/// ```text
/// xdot = (sigma * (y - x), x * (rho - z) - y, x * y - beta * z)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Lorenz {
    /// Classic chaotic parameters: sigma = 10, rho = 28, beta = 8/3.
    fn default() -> Self {
        Self { sigma: 10.0, rho: 28.0, beta: 8.0 / 3.0 }
    }
}

impl VectorField for Lorenz {
    fn dim(&self) -> usize {
        3
    }

    fn eval(&self, _t: f64, x: &[f64], xdot: &mut [f64]) {
        let v = DVec3::new(x[0], x[1], x[2]);
        let d = DVec3::new(
            self.sigma * (v.y - v.x),
            v.x * (self.rho - v.z) - v.y,
            v.x * v.y - self.beta * v.z,
        );
        xdot[..3].copy_from_slice(&d.to_array());
    }
}

impl OdeSystem for Lorenz {
    fn name(&self) -> &'static str {
        "lorenz"
    }

    fn parameters(&self) -> Parameters {
        Parameters::from_pairs(&[("sigma", self.sigma), ("rho", self.rho), ("beta", self.beta)])
    }

    fn set_parameters(&mut self, update: &Parameters) -> Result<(), ParameterError> {
        for (name, value) in update.iter() {
            match name {
                "sigma" => self.sigma = value,
                "rho" => self.rho = value,
                "beta" => self.beta = value,
                _ => {
                    return Err(ParameterError::Unknown {
                        system: self.name(),
                        name: name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn glsl_body(&self) -> &'static str {
        r#"vec3 xdot(vec3 x) {
  return vec3(
    sigma * (x.y - x.x),
    x.x * (rho - x.z) - x.y,
    x.x * x.y - beta * x.z
  );
}"#
    }
}

/// The Rössler system, a single-scroll band attractor.
///
/// ```text
/// xdot = (-y - z, x + a * y, b + z * (x - c))
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Roessler {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for Roessler {
    /// Classic chaotic parameters: a = 0.2, b = 0.2, c = 14.
    fn default() -> Self {
        Self { a: 0.2, b: 0.2, c: 14.0 }
    }
}

impl VectorField for Roessler {
    fn dim(&self) -> usize {
        3
    }

    fn eval(&self, _t: f64, x: &[f64], xdot: &mut [f64]) {
        let v = DVec3::new(x[0], x[1], x[2]);
        let d = DVec3::new(-v.y - v.z, v.x + self.a * v.y, self.b + v.z * (v.x - self.c));
        xdot[..3].copy_from_slice(&d.to_array());
    }
}

impl OdeSystem for Roessler {
    fn name(&self) -> &'static str {
        "roessler"
    }

    fn parameters(&self) -> Parameters {
        Parameters::from_pairs(&[("a", self.a), ("b", self.b), ("c", self.c)])
    }

    fn set_parameters(&mut self, update: &Parameters) -> Result<(), ParameterError> {
        for (name, value) in update.iter() {
            match name {
                "a" => self.a = value,
                "b" => self.b = value,
                "c" => self.c = value,
                _ => {
                    return Err(ParameterError::Unknown {
                        system: self.name(),
                        name: name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn glsl_body(&self) -> &'static str {
        r#"vec3 xdot(vec3 x) {
  return vec3(
    -x.y - x.z,
    x.x + a * x.y,
    b + x.z * (x.x - c)
  );
}"#
    }
}

/// Thomas' cyclically symmetric system.
///
/// ```text
/// xdot = (sin(y) - b * x, sin(z) - b * y, sin(x) - b * z)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Thomas {
    pub b: f64,
}

impl Default for Thomas {
    /// b = 0.208186, near the edge of chaos.
    fn default() -> Self {
        Self { b: 0.208186 }
    }
}

impl VectorField for Thomas {
    fn dim(&self) -> usize {
        3
    }

    fn eval(&self, _t: f64, x: &[f64], xdot: &mut [f64]) {
        let v = DVec3::new(x[0], x[1], x[2]);
        let d = DVec3::new(
            v.y.sin() - self.b * v.x,
            v.z.sin() - self.b * v.y,
            v.x.sin() - self.b * v.z,
        );
        xdot[..3].copy_from_slice(&d.to_array());
    }
}

impl OdeSystem for Thomas {
    fn name(&self) -> &'static str {
        "thomas"
    }

    fn parameters(&self) -> Parameters {
        Parameters::from_pairs(&[("b", self.b)])
    }

    fn set_parameters(&mut self, update: &Parameters) -> Result<(), ParameterError> {
        for (name, value) in update.iter() {
            match name {
                "b" => self.b = value,
                _ => {
                    return Err(ParameterError::Unknown {
                        system: self.name(),
                        name: name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn glsl_body(&self) -> &'static str {
        r#"vec3 xdot(vec3 x) {
  return vec3(
    sin(x.y) - b * x.x,
    sin(x.z) - b * x.y,
    sin(x.x) - b * x.z
  );
}"#
    }
}

/// Modified Chua system with a sine nonlinearity (multi-scroll attractor).
///
/// The nonlinearity `h(x)` has three regimes split at `±2ac`: a sine wave in
/// the middle and linear saturation outside, joined continuously. Both the
/// CPU derivative and the GLSL body implement the full piecewise definition.
///
/// ```text
/// xdot = (alpha * (y - h(x)), x - y + z, -beta * y)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ModifiedChua {
    pub alpha: f64,
    pub beta: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for ModifiedChua {
    /// Classic multi-scroll parameters.
    fn default() -> Self {
        Self { alpha: 10.82, beta: 14.286, a: 1.3, b: 0.11, c: 7.0, d: 0.0 }
    }
}

impl ModifiedChua {
    /// The piecewise nonlinearity `h(x)`.
    pub fn nonlinearity(&self, x: f64) -> f64 {
        let knee = 2.0 * self.a * self.c;
        let slope = self.b * std::f64::consts::PI / (2.0 * self.a);
        if x >= knee {
            slope * (x - knee)
        } else if x <= -knee {
            slope * (x + knee)
        } else {
            -self.b * (std::f64::consts::PI * x / (2.0 * self.a) + self.d).sin()
        }
    }
}

impl VectorField for ModifiedChua {
    fn dim(&self) -> usize {
        3
    }

    fn eval(&self, _t: f64, x: &[f64], xdot: &mut [f64]) {
        let v = DVec3::new(x[0], x[1], x[2]);
        let h = self.nonlinearity(v.x);
        let d = DVec3::new(self.alpha * (v.y - h), v.x - v.y + v.z, -self.beta * v.y);
        xdot[..3].copy_from_slice(&d.to_array());
    }
}

impl OdeSystem for ModifiedChua {
    fn name(&self) -> &'static str {
        "chua"
    }

    fn parameters(&self) -> Parameters {
        Parameters::from_pairs(&[
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("d", self.d),
        ])
    }

    fn set_parameters(&mut self, update: &Parameters) -> Result<(), ParameterError> {
        for (name, value) in update.iter() {
            match name {
                "alpha" => self.alpha = value,
                "beta" => self.beta = value,
                "a" => self.a = value,
                "b" => self.b = value,
                "c" => self.c = value,
                "d" => self.d = value,
                _ => {
                    return Err(ParameterError::Unknown {
                        system: self.name(),
                        name: name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn glsl_body(&self) -> &'static str {
        r#"float chua_h(float x) {
  float knee = 2.0 * a * c;
  float slope = b * 3.14159265358979 / (2.0 * a);
  if (x >= knee) {
    return slope * (x - knee);
  }
  if (x <= -knee) {
    return slope * (x + knee);
  }
  return -b * sin(3.14159265358979 * x / (2.0 * a) + d);
}

vec3 xdot(vec3 x) {
  return vec3(
    alpha * (x.y - chua_h(x.x)),
    x.x - x.y + x.z,
    -beta * x.y
  );
}"#
    }
}
