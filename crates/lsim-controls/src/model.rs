//! Process-model boundary.

use lsim_core::Real;

/// Mathematical model of the controlled process.
///
/// Maps a raw control value to the process response increment. The model is
/// caller-supplied and assumed pure; the controllers never inspect it. A
/// blanket implementation covers every `Fn(Real) -> Real`, so plain closures
/// work directly:
///
/// ```
/// use lsim_controls::ProcessModel;
///
/// let quadratic = |x: f64| 0.1 * x * x;
/// assert_eq!(quadratic.respond(2.0), 0.4);
/// ```
pub trait ProcessModel {
    /// Process response to the raw control value `u`.
    fn respond(&self, u: Real) -> Real;
}

impl<F> ProcessModel for F
where
    F: Fn(Real) -> Real,
{
    fn respond(&self, u: Real) -> Real {
        self(u)
    }
}
