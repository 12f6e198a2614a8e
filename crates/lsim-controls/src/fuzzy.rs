//! Rule-based (fuzzy) controller variant.
//!
//! The controller composes an opaque [`InferenceEngine`] instead of extending
//! it: the engine has already been configured with membership functions and a
//! compiled rule base for the three variables the controller was built with,
//! and the controller only feeds it the tracking error and its per-sample
//! difference.

use std::collections::HashMap;

use lsim_core::Real;
use serde::{Deserialize, Serialize};

use crate::controller::Controller;
use crate::error::{ControlError, ControlResult};
use crate::model::ProcessModel;
use crate::variable::FuzzyVariable;

/// Opaque rule evaluator: two scalar inputs, one crisp output.
///
/// The first input is the tracking error, the second its per-sample
/// difference, matching the error and derivative-error variables the engine
/// was configured with. When the inputs fall outside every rule's active
/// region the engine must return [`ControlError::InferenceUndefined`] rather
/// than substituting a value.
pub trait InferenceEngine {
    /// Evaluate the rule base and defuzzify to a single crisp output.
    fn infer(&mut self, error: Real, derror: Real) -> ControlResult<Real>;
}

/// Tuning knobs for the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Clamp the crisp output into the output variable's universe.
    pub clip_to_bounds: bool,
    /// Memoize repeated identical input pairs. A performance opt-in, not a
    /// correctness requirement.
    pub cache: bool,
    /// Cache entry count that forces a flush before the next insert.
    pub cache_flush_threshold: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            clip_to_bounds: true,
            cache: true,
            cache_flush_threshold: 1000,
        }
    }
}

/// Rule-based controller delegating the control law to a fuzzy inference
/// engine.
///
/// Owns the engine value; borrows the caller-owned descriptions of the error,
/// derivative-error and output variables read-only for the life of the run.
/// Per step it computes `e = reference - feedback` and `de = e - e_prev`,
/// asks the engine for a crisp output, optionally clips it into the output
/// universe and feeds it to the process model. An engine error propagates and
/// leaves the controller memory for that step untouched.
pub struct FuzzyController<'v, E, M> {
    reference: Real,
    error_var: &'v FuzzyVariable,
    derror_var: &'v FuzzyVariable,
    output_var: &'v FuzzyVariable,
    engine: E,
    model: M,
    options: EngineOptions,
    cache: HashMap<(u64, u64), Real>,
    // Transient memory, touched only by step/clear.
    last_error: Real,
}

impl<'v, E, M> FuzzyController<'v, E, M>
where
    E: InferenceEngine,
    M: ProcessModel,
{
    /// Create a rule-based controller with default [`EngineOptions`].
    ///
    /// # Arguments
    ///
    /// * `reference` - Target value (any finite scalar, accepted unvalidated)
    /// * `error_var`, `derror_var`, `output_var` - Variable descriptions the
    ///   engine was configured with
    /// * `engine` - Configured inference engine
    /// * `model` - Process model receiving the crisp output
    pub fn new(
        reference: Real,
        error_var: &'v FuzzyVariable,
        derror_var: &'v FuzzyVariable,
        output_var: &'v FuzzyVariable,
        engine: E,
        model: M,
    ) -> Self {
        Self {
            reference,
            error_var,
            derror_var,
            output_var,
            engine,
            model,
            options: EngineOptions::default(),
            cache: HashMap::new(),
            last_error: 0.0,
        }
    }

    /// Replace the engine boundary options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Engine boundary options in use.
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// The error, derivative-error and output variable descriptions.
    pub fn variables(&self) -> (&FuzzyVariable, &FuzzyVariable, &FuzzyVariable) {
        (self.error_var, self.derror_var, self.output_var)
    }

    /// Run inference, consulting the memo cache when enabled.
    fn evaluate(&mut self, error: Real, derror: Real) -> ControlResult<Real> {
        if !self.options.cache {
            return self.engine.infer(error, derror);
        }

        // Keyed by bit pattern: identical inputs, not nearly-equal ones.
        let key = (error.to_bits(), derror.to_bits());
        if let Some(&hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let crisp = self.engine.infer(error, derror)?;
        if self.cache.len() >= self.options.cache_flush_threshold {
            self.cache.clear();
        }
        self.cache.insert(key, crisp);
        Ok(crisp)
    }
}

impl<E, M> Controller for FuzzyController<'_, E, M>
where
    E: InferenceEngine,
    M: ProcessModel,
{
    fn reference(&self) -> Real {
        self.reference
    }

    fn clear(&mut self) {
        // The memo cache survives: entries depend only on engine inputs.
        self.last_error = 0.0;
    }

    fn step(&mut self, feedback: Real) -> ControlResult<Real> {
        let error = self.reference - feedback;
        let derror = error - self.last_error;

        let crisp = self.evaluate(error, derror)?;
        let u = if self.options.clip_to_bounds {
            self.output_var.clip(crisp)
        } else {
            crisp
        };

        self.last_error = error;
        Ok(self.model.respond(u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Engine stub that returns a fixed value and counts invocations.
    struct CountingEngine {
        output: Real,
        calls: usize,
    }

    impl CountingEngine {
        fn new(output: Real) -> Self {
            Self { output, calls: 0 }
        }
    }

    impl InferenceEngine for CountingEngine {
        fn infer(&mut self, _error: Real, _derror: Real) -> ControlResult<Real> {
            self.calls += 1;
            Ok(self.output)
        }
    }

    /// Engine stub with no rule coverage anywhere.
    struct UncoveredEngine;

    impl InferenceEngine for UncoveredEngine {
        fn infer(&mut self, error: Real, derror: Real) -> ControlResult<Real> {
            Err(ControlError::InferenceUndefined { error, derror })
        }
    }

    fn variables() -> (FuzzyVariable, FuzzyVariable, FuzzyVariable) {
        (
            FuzzyVariable::new("err", -50.0, 50.0).unwrap(),
            FuzzyVariable::new("derr", -20.0, 20.0).unwrap(),
            FuzzyVariable::new("acc", 0.0, 10.0).unwrap(),
        )
    }

    fn identity(x: Real) -> Real {
        x
    }

    #[test]
    fn derror_is_difference_of_consecutive_errors() {
        struct Probe {
            seen: Vec<(Real, Real)>,
        }
        impl InferenceEngine for Probe {
            fn infer(&mut self, error: Real, derror: Real) -> ControlResult<Real> {
                self.seen.push((error, derror));
                Ok(0.0)
            }
        }

        let (e, de, u) = variables();
        let mut ctrl =
            FuzzyController::new(50.0, &e, &de, &u, Probe { seen: Vec::new() }, identity);
        ctrl.step(0.0).unwrap(); // e = 50, de = 50 - 0
        ctrl.step(10.0).unwrap(); // e = 40, de = 40 - 50

        assert_eq!(ctrl.engine.seen, vec![(50.0, 50.0), (40.0, -10.0)]);
    }

    #[test]
    fn output_is_clipped_to_output_universe_by_default() {
        let (e, de, u) = variables();
        let mut ctrl =
            FuzzyController::new(50.0, &e, &de, &u, CountingEngine::new(42.0), identity);
        assert_eq!(ctrl.step(0.0).unwrap(), 10.0);
    }

    #[test]
    fn clipping_can_be_disabled() {
        let (e, de, u) = variables();
        let mut ctrl = FuzzyController::new(50.0, &e, &de, &u, CountingEngine::new(42.0), identity)
            .with_options(EngineOptions {
                clip_to_bounds: false,
                ..EngineOptions::default()
            });
        assert_eq!(ctrl.step(0.0).unwrap(), 42.0);
    }

    #[test]
    fn repeated_identical_inputs_hit_the_cache() {
        let (e, de, u) = variables();
        let mut ctrl =
            FuzzyController::new(50.0, &e, &de, &u, CountingEngine::new(5.0), identity);

        // Same feedback after clear() replays the same (error, derror) pair.
        ctrl.step(0.0).unwrap();
        ctrl.clear();
        ctrl.step(0.0).unwrap();
        ctrl.clear();
        ctrl.step(0.0).unwrap();

        assert_eq!(ctrl.engine.calls, 1);
    }

    #[test]
    fn disabling_the_cache_reinvokes_the_engine() {
        let (e, de, u) = variables();
        let mut ctrl = FuzzyController::new(50.0, &e, &de, &u, CountingEngine::new(5.0), identity)
            .with_options(EngineOptions {
                cache: false,
                ..EngineOptions::default()
            });

        ctrl.step(0.0).unwrap();
        ctrl.clear();
        ctrl.step(0.0).unwrap();

        assert_eq!(ctrl.engine.calls, 2);
    }

    #[test]
    fn exceeding_the_flush_threshold_resets_the_cache() {
        let (e, de, u) = variables();
        let mut ctrl = FuzzyController::new(50.0, &e, &de, &u, CountingEngine::new(5.0), identity)
            .with_options(EngineOptions {
                cache_flush_threshold: 2,
                ..EngineOptions::default()
            });

        // Three distinct pairs; the third insert flushes the first two.
        for fb in [0.0, 1.0, 2.0] {
            ctrl.clear();
            ctrl.step(fb).unwrap();
        }
        assert_eq!(ctrl.engine.calls, 3);

        // The first pair is gone, so it costs another evaluation.
        ctrl.clear();
        ctrl.step(0.0).unwrap();
        assert_eq!(ctrl.engine.calls, 4);
    }

    #[test]
    fn undefined_inference_propagates_and_leaves_memory_untouched() {
        let (e, de, u) = variables();
        let mut ctrl = FuzzyController::new(50.0, &e, &de, &u, UncoveredEngine, identity);

        let err = ctrl.step(0.0).unwrap_err();
        assert_eq!(
            err,
            ControlError::InferenceUndefined {
                error: 50.0,
                derror: 50.0,
            }
        );
        // last_error was not advanced: the same step replays identically.
        let again = ctrl.step(0.0).unwrap_err();
        assert_eq!(err, again);
    }
}
