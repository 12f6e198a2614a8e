//! Simulation loop and trajectory recording.

use lsim_controls::Controller;
use lsim_core::Real;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SimError, SimResult};

/// Options for a single closed-loop run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopOptions {
    /// Number of discrete steps to drive. The returned trajectory holds
    /// `steps + 1` samples (seed included).
    pub steps: usize,
    /// Initial feedback value seeding the trajectory.
    pub initial: Real,
    /// Abort with [`SimError::NonFinite`] when an appended sample is NaN or
    /// infinite. Off by default: non-finite values then propagate
    /// arithmetically and poison the rest of the trajectory, as the plain
    /// recurrence would.
    pub check_finite: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            steps: 100,
            initial: 0.0,
            check_finite: false,
        }
    }
}

/// Ordered, append-only record of feedback samples.
///
/// Index = discrete time step; element 0 is the seed. Serializes as a flat
/// array for the external plotting/reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    values: Vec<Real>,
}

impl Trajectory {
    fn with_seed(seed: Real, steps: usize) -> Self {
        let mut values = Vec::with_capacity(steps + 1);
        values.push(seed);
        Self { values }
    }

    fn push(&mut self, value: Real) {
        self.values.push(value);
    }

    /// Number of recorded samples (`steps + 1` for a completed run).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All samples in step order.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Sample at a discrete time step, if recorded.
    pub fn get(&self, step: usize) -> Option<Real> {
        self.values.get(step).copied()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<Real> {
        self.values.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.values.iter().copied()
    }
}

/// Drive `opts.steps` discrete steps of a closed loop.
///
/// Feeds each recorded sample back into the controller and accumulates the
/// response: `trajectory[k+1] = trajectory[k] + controller.step(trajectory[k])`.
/// Controller memory is **not** cleared here; re-running with the same
/// controller requires an explicit `clear()` first.
pub fn run_loop<C: Controller>(controller: &mut C, opts: &LoopOptions) -> SimResult<Trajectory> {
    let mut trajectory = Trajectory::with_seed(opts.initial, opts.steps);
    let mut feedback = opts.initial;

    for step in 0..opts.steps {
        let increment = controller
            .step(feedback)
            .map_err(|source| SimError::Controller { step, source })?;
        let next = feedback + increment;
        if opts.check_finite && !next.is_finite() {
            return Err(SimError::NonFinite { step, value: next });
        }
        trace!(step, feedback, increment, "loop step");
        trajectory.push(next);
        feedback = next;
    }

    debug!(steps = opts.steps, last = feedback, "run complete");
    Ok(trajectory)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use lsim_controls::{PidController, PidGains};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn completed_runs_record_steps_plus_one(
            steps in 0_usize..200,
            initial in -100.0_f64..100.0,
            kp in -1.0_f64..1.0,
        ) {
            let gains = Some(PidGains::new(kp, 0.0, 0.0));
            let mut pid = PidController::new(10.0, 1.0, |x: Real| 0.5 * x, gains).unwrap();
            let opts = LoopOptions { steps, initial, check_finite: false };

            let trajectory = run_loop(&mut pid, &opts).unwrap();
            prop_assert_eq!(trajectory.len(), steps + 1);
            prop_assert_eq!(trajectory.get(0), Some(initial));
        }
    }
}
