use crate::LoopError;

/// Floating point type for all signals, gains and trajectories.
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

/// Compare two scalars under an absolute-or-relative tolerance.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Reject NaN and infinities with a named context.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, LoopError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LoopError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_absolute_and_relative() {
        let tol = Tolerances::new(1e-12, 1e-9);
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(1e6, 1e6 + 1e-4, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_accepts_finite() {
        assert_eq!(ensure_finite(-3.5, "signal").unwrap(), -3.5);
    }

    #[test]
    fn ensure_finite_rejects_nan_and_inf() {
        assert!(matches!(
            ensure_finite(Real::NAN, "signal"),
            Err(LoopError::NonFinite { what: "signal", .. })
        ));
        assert!(matches!(
            ensure_finite(Real::INFINITY, "signal"),
            Err(LoopError::NonFinite { .. })
        ));
    }
}
