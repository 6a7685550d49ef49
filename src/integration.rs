//! Adaptive Runge-Kutta-Fehlberg integration.
//!
//! [`RungeKuttaIntegrator`] advances one trajectory of a [`VectorField`]
//! using the embedded RKF45 pair: six derivative stages produce both a
//! 5th-order update and a 4th-order error estimate, and the step size grows
//! or shrinks to hold the local truncation error at the tolerance.
//!
//! Each call to [`RungeKuttaIntegrator::step`] returns exactly one accepted
//! step. Rejected trial steps are retried internally with a smaller step
//! size, inside a bounded loop with a minimum-step floor, so a pathological
//! tolerance or an unstable field surfaces as an [`IntegrationError`] instead
//! of hanging the animation loop.
//!
//! # Example
//!
//! ```
//! use strange::integration::RungeKuttaIntegrator;
//! use strange::systems::Lorenz;
//!
//! let mut rk = RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-6);
//!
//! let (t, x) = rk.step().unwrap();
//! assert!(t > 0.0);
//! assert_eq!(x.len(), 3);
//! ```

use crate::error::IntegrationError;
use crate::systems::VectorField;

/// Number of derivative stages in the RKF45 pair.
const STAGES: usize = 6;

/// Stage time offsets as fractions of the step size.
const A: [f64; STAGES] = [0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0];

/// Lower-triangular stage coupling coefficients.
const B: [[f64; STAGES - 1]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 4.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 32.0, 9.0 / 32.0, 0.0, 0.0, 0.0],
    [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0, 0.0, 0.0],
    [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0, 0.0],
    [-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
];

/// 5th-order combination weights.
const CH: [f64; STAGES] =
    [16.0 / 135.0, 0.0, 6656.0 / 12825.0, 28561.0 / 56430.0, -9.0 / 50.0, 2.0 / 55.0];

/// Truncation error estimate weights.
const CT: [f64; STAGES] =
    [-1.0 / 360.0, 0.0, 128.0 / 4275.0, 2197.0 / 75240.0, -1.0 / 50.0, -2.0 / 55.0];

/// Safety factor applied to the step-size controller.
const SAFETY: f64 = 0.9;

/// Upper bound on step growth per accepted step.
const MAX_GROWTH: f64 = 4.0;

/// Lower bound on step shrinkage per rejected step.
const MIN_SHRINK: f64 = 0.1;

/// Default floor for the step size before giving up.
const DEFAULT_MIN_STEP: f64 = 1e-12;

/// Default bound on rejected trial steps within one call to `step`.
const DEFAULT_MAX_REJECTS: u32 = 64;

/// Adaptive-step RKF45 integrator for one trajectory.
///
/// Owns its state vector and all stage scratch buffers exclusively; nothing
/// is allocated per step. `x` always holds the last accepted state and `h`
/// the step size to attempt next, already resized by the previous
/// accept/reject cycle.
///
/// The vector field is owned too, so live parameter edits go through
/// [`RungeKuttaIntegrator::field_mut`] between steps:
///
/// ```
/// use strange::integration::RungeKuttaIntegrator;
/// use strange::systems::{Lorenz, OdeSystem};
/// use strange::params::Parameters;
///
/// let mut rk = RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-6);
/// rk.step().unwrap();
/// rk.field_mut().set_parameters(&Parameters::from_pairs(&[("rho", 24.0)])).unwrap();
/// rk.step().unwrap();
/// ```
pub struct RungeKuttaIntegrator<F: VectorField> {
    field: F,
    t: f64,
    h: f64,
    eps: f64,
    min_step: f64,
    max_rejects: u32,
    dim: usize,
    x: Vec<f64>,
    tmp: Vec<f64>,
    err: Vec<f64>,
    ks: [Vec<f64>; STAGES],
}

impl<F: VectorField> RungeKuttaIntegrator<F> {
    /// Create an integrator at `(t0, x0)` with initial step `dt` and
    /// tolerance `eps`.
    ///
    /// # Panics
    ///
    /// Panics if `x0.len()` does not match the field's dimension.
    pub fn new(field: F, x0: &[f64], t0: f64, dt: f64, eps: f64) -> Self {
        assert_eq!(
            x0.len(),
            field.dim(),
            "state dimension does not match the vector field"
        );
        let dim = x0.len();
        Self {
            field,
            t: t0,
            h: dt,
            eps,
            min_step: DEFAULT_MIN_STEP,
            max_rejects: DEFAULT_MAX_REJECTS,
            dim,
            x: x0.to_vec(),
            tmp: vec![0.0; dim],
            err: vec![0.0; dim],
            ks: std::array::from_fn(|_| vec![0.0; dim]),
        }
    }

    /// Set the step-size floor below which a rejected step fails with
    /// [`IntegrationError::StepUnderflow`].
    pub fn with_min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step;
        self
    }

    /// Set the number of rejected trial steps tolerated within one call to
    /// [`RungeKuttaIntegrator::step`] before failing with
    /// [`IntegrationError::Diverged`].
    pub fn with_max_rejects(mut self, max_rejects: u32) -> Self {
        self.max_rejects = max_rejects;
        self
    }

    /// Advance by exactly one accepted step and return the new `(t, x)`.
    pub fn step(&mut self) -> Result<(f64, &[f64]), IntegrationError> {
        let mut rejections = 0u32;
        loop {
            // Six derivative stages, each evaluated on a trial state built
            // from the stages before it.
            for k in 0..STAGES {
                self.tmp.copy_from_slice(&self.x);
                for l in 0..k {
                    let w = self.h * B[k][l];
                    if w == 0.0 {
                        continue;
                    }
                    for (trial, stage) in self.tmp.iter_mut().zip(&self.ks[l]) {
                        *trial += w * stage;
                    }
                }
                self.field.eval(self.t + self.h * A[k], &self.tmp, &mut self.ks[k]);
            }

            // 5th-order candidate state and the 4/5 difference term.
            self.err.fill(0.0);
            self.tmp.copy_from_slice(&self.x);
            for k in 0..STAGES {
                let wc = self.h * CH[k];
                let we = self.h * CT[k];
                for i in 0..self.dim {
                    self.tmp[i] += wc * self.ks[k][i];
                    self.err[i] += we * self.ks[k][i];
                }
            }

            let total_error = self.err.iter().map(|e| e * e).sum::<f64>().sqrt();
            if !total_error.is_finite() || self.tmp.iter().any(|v| !v.is_finite()) {
                return Err(IntegrationError::NonFinite { t: self.t });
            }

            // h_next = 0.9 * h * (eps / err)^(1/5), clamped so a vanishing
            // error cannot blow the step up to infinity.
            let factor = if total_error > 0.0 {
                (SAFETY * (self.eps / total_error).powf(0.2)).clamp(MIN_SHRINK, MAX_GROWTH)
            } else {
                MAX_GROWTH
            };
            let h_next = self.h * factor;

            if total_error > self.eps {
                rejections += 1;
                self.h = h_next;
                if self.h < self.min_step {
                    return Err(IntegrationError::StepUnderflow {
                        step_size: self.h,
                        min_step: self.min_step,
                    });
                }
                if rejections >= self.max_rejects {
                    return Err(IntegrationError::Diverged {
                        rejections,
                        step_size: self.h,
                    });
                }
                continue;
            }

            self.t += self.h;
            self.h = h_next;
            self.x.copy_from_slice(&self.tmp);
            return Ok((self.t, &self.x));
        }
    }

    /// Last accepted `(t, x)`.
    pub fn state(&self) -> (f64, &[f64]) {
        (self.t, &self.x)
    }

    /// Time of the last accepted step.
    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Last accepted state vector.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Step size that will be attempted next.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.h
    }

    /// Local error tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.eps
    }

    /// The integrated vector field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable access to the field, for live parameter updates between steps.
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{FieldFn, Lorenz};

    #[test]
    fn test_single_lorenz_step() {
        let mut rk =
            RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 2.0, 1.0], 0.0, 0.01, 1e-6);

        let (t, x) = rk.step().unwrap();
        assert!(t > 0.0);
        assert!(x.iter().all(|v| v.is_finite()));
        assert_ne!(x, &[1.0, 2.0, 1.0]);

        let t1 = t;
        let (t2, _) = rk.step().unwrap();
        assert!(t2 > t1);
    }

    #[test]
    fn test_exponential_decay_matches_exact_solution() {
        let field = FieldFn::new(1, |_t, x: &[f64], xdot: &mut [f64]| {
            xdot[0] = -x[0];
        });
        let mut rk = RungeKuttaIntegrator::new(field, &[1.0], 0.0, 0.01, 1e-9);

        let mut t = 0.0;
        let mut value = 1.0;
        while t < 2.0 {
            let (tn, x) = rk.step().unwrap();
            t = tn;
            value = x[0];
        }
        assert!((value - (-t).exp()).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut a = RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-6);
        let mut b = RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-6);

        for _ in 0..200 {
            let (ta, xa) = {
                let (t, x) = a.step().unwrap();
                (t, x.to_vec())
            };
            let (tb, xb) = b.step().unwrap();
            assert_eq!(ta, tb);
            assert_eq!(xa.as_slice(), xb);
        }
    }

    #[test]
    fn test_zero_derivative_grows_step_up_to_cap() {
        let field = FieldFn::new(2, |_t, _x: &[f64], xdot: &mut [f64]| {
            xdot.fill(0.0);
        });
        let mut rk = RungeKuttaIntegrator::new(field, &[1.0, -1.0], 0.0, 0.5, 1e-6);

        let (t, x) = rk.step().unwrap();
        assert_eq!(t, 0.5);
        assert_eq!(x, &[1.0, -1.0]);
        assert_eq!(rk.step_size(), 0.5 * MAX_GROWTH);
    }

    #[test]
    fn test_nan_derivative_is_detected() {
        let field = FieldFn::new(1, |_t, _x: &[f64], xdot: &mut [f64]| {
            xdot[0] = f64::NAN;
        });
        let mut rk = RungeKuttaIntegrator::new(field, &[1.0], 0.0, 0.01, 1e-6);

        assert!(matches!(rk.step(), Err(IntegrationError::NonFinite { .. })));
    }

    #[test]
    fn test_impossible_tolerance_underflows_step() {
        // eps = 0 can never be met, so every trial step is rejected and the
        // step size shrinks until it hits the floor.
        let mut rk =
            RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 0.0);

        match rk.step() {
            Err(IntegrationError::StepUnderflow { step_size, min_step }) => {
                assert!(step_size < min_step);
            }
            other => panic!("expected StepUnderflow, got {:?}", other.map(|(t, _)| t)),
        }
    }

    #[test]
    fn test_bounded_rejects_reports_divergence() {
        let mut rk = RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 0.0)
            .with_min_step(0.0)
            .with_max_rejects(3);

        assert!(matches!(
            rk.step(),
            Err(IntegrationError::Diverged { rejections: 3, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "state dimension")]
    fn test_dimension_mismatch_panics() {
        let _ = RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0], 0.0, 0.01, 1e-6);
    }
}
