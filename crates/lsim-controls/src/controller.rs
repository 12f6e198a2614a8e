//! Controller contract and the classical PID variant.

use lsim_core::{Real, ensure_finite};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::model::ProcessModel;

/// Discrete-time feedback controller driving a process model.
///
/// A controller is constructed once per run with a fixed reference and owns
/// its transient memory. [`step`](Controller::step) is the only operation
/// with side effects; [`clear`](Controller::clear) rewinds the memory so the
/// same value can drive a fresh run without reconstruction.
///
/// Concurrent calls to `step` on one instance are not supported; a run's step
/// sequence is strictly ordered.
pub trait Controller {
    /// Fixed target value for the run.
    fn reference(&self) -> Real;

    /// Reset transient memory. The next `step` behaves like the first step
    /// of a fresh run. Never fails.
    fn clear(&mut self);

    /// Advance one step: compute the tracking error for `feedback`, update
    /// internal memory and return the process response to the raw control
    /// value.
    ///
    /// Behavior for non-finite `feedback` is unspecified; keeping the input
    /// finite is the caller's responsibility.
    fn step(&mut self, feedback: Real) -> ControlResult<Real>;
}

/// PID gain triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain.
    pub ki: Real,
    /// Derivative gain (applied to the raw per-sample error difference).
    pub kd: Real,
}

impl PidGains {
    pub const fn new(kp: Real, ki: Real, kd: Real) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for PidGains {
    /// Unit proportional gain only. Used when a caller supplies no gains;
    /// missing parameters default rather than fail.
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

/// Classical PID controller with a trapezoidal integral.
///
/// Per step, with `e = reference - feedback` and `e_prev` the previous error:
///
/// ```text
/// A += dt * (e + e_prev) / 2
/// u  = kp*e + ki*A + kd*(e - e_prev)
/// ```
///
/// Contract notes:
/// - The derivative term is the raw per-sample difference, **not** divided by
///   the sampling period; `kd` absorbs the period. Pinned by the golden
///   regression test in `lsim-sim`.
/// - No anti-windup: the integral accumulator is deliberately unbounded.
/// - Output saturation is off by default; opt in via
///   [`with_output_limits`](PidController::with_output_limits), which clamps
///   the raw control value before it reaches the process model.
#[derive(Debug, Clone)]
pub struct PidController<M> {
    reference: Real,
    sampling: Real,
    gains: PidGains,
    model: M,
    limits: Option<(Real, Real)>,
    // Transient memory, touched only by step/clear.
    integral: Real,
    last_error: Real,
}

impl<M: ProcessModel> PidController<M> {
    /// Create a PID controller.
    ///
    /// # Arguments
    ///
    /// * `reference` - Target value (any finite scalar, accepted unvalidated)
    /// * `sampling` - Sampling period (must be positive and finite)
    /// * `model` - Process model receiving the raw control value
    /// * `gains` - Gain triple; `None` defaults to `(1, 0, 0)`
    pub fn new(
        reference: Real,
        sampling: Real,
        model: M,
        gains: Option<PidGains>,
    ) -> ControlResult<Self> {
        ensure_finite(sampling, "sampling period")?;
        if sampling <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "sampling period must be positive",
            });
        }
        Ok(Self {
            reference,
            sampling,
            gains: gains.unwrap_or_default(),
            model,
            limits: None,
            integral: 0.0,
            last_error: 0.0,
        })
    }

    /// Enable output saturation: the raw control value is clamped to
    /// `[min, max]` before being fed to the process model.
    pub fn with_output_limits(mut self, min: Real, max: Real) -> ControlResult<Self> {
        if min >= max {
            return Err(ControlError::InvalidArg {
                what: "output min must be less than output max",
            });
        }
        self.limits = Some((min, max));
        Ok(self)
    }

    /// Gain triple in use.
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Sampling period.
    pub fn sampling(&self) -> Real {
        self.sampling
    }

    /// Current integral accumulator (diagnostic; tuning and tests only).
    pub fn integral_term(&self) -> Real {
        self.integral
    }
}

impl<M: ProcessModel> Controller for PidController<M> {
    fn reference(&self) -> Real {
        self.reference
    }

    fn clear(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
    }

    fn step(&mut self, feedback: Real) -> ControlResult<Real> {
        let error = self.reference - feedback;
        self.integral += self.sampling * (error + self.last_error) / 2.0;

        let PidGains { kp, ki, kd } = self.gains;
        let mut u = kp * error + ki * self.integral + kd * (error - self.last_error);
        if let Some((min, max)) = self.limits {
            u = u.clamp(min, max);
        }

        // Memory updates after u so the derivative sees the previous error.
        self.last_error = error;
        Ok(self.model.respond(u))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clear_then_rerun_is_bit_identical(
            kp in -2.0_f64..2.0,
            ki in -0.5_f64..0.5,
            kd in -0.5_f64..0.5,
            feedbacks in prop::collection::vec(-100.0_f64..100.0, 1..40),
        ) {
            let gains = Some(PidGains::new(kp, ki, kd));
            let mut pid = PidController::new(25.0, 0.2, |x: Real| 0.5 * x, gains).unwrap();

            let first: Vec<Real> = feedbacks
                .iter()
                .map(|&fb| pid.step(fb).unwrap())
                .collect();
            pid.clear();
            let second: Vec<Real> = feedbacks
                .iter()
                .map(|&fb| pid.step(fb).unwrap())
                .collect();

            prop_assert_eq!(first, second);
        }
    }
}
