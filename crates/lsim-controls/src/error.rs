//! Error types for controller operations.

use lsim_core::{LoopError, Real};
use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while constructing or stepping a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a constructor or option setter.
    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The inference engine had no rule coverage for the given inputs.
    ///
    /// The rule-based controller propagates this instead of substituting a
    /// crisp value; the driver decides how to handle it.
    #[error("inference undefined for inputs (error={error}, derror={derror})")]
    InferenceUndefined { error: Real, derror: Real },

    /// Shared numeric guard tripped (non-finite parameter).
    #[error(transparent)]
    Core(#[from] LoopError),
}
