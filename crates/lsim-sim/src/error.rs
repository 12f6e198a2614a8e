//! Error types for simulation runs.

use lsim_controls::ControlError;
use lsim_core::Real;
use thiserror::Error;

/// Errors encountered while driving a closed-loop run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The controller failed mid-run; `step` is the loop index at which it
    /// happened (the trajectory holds `step + 1` valid samples at that point).
    #[error("controller failed at step {step}")]
    Controller {
        step: usize,
        #[source]
        source: ControlError,
    },

    /// A non-finite sample was about to enter the trajectory while the
    /// finiteness guard was enabled.
    #[error("non-finite feedback at step {step}: {value}")]
    NonFinite { step: usize, value: Real },
}

pub type SimResult<T> = Result<T, SimError>;
