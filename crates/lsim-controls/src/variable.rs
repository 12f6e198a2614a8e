//! Fuzzy linguistic variable descriptions.
//!
//! A [`FuzzyVariable`] carries only what the controller side needs to know
//! about a linguistic variable: the label the engine was configured with and
//! the universe-of-discourse bounds. Membership functions and rule bases live
//! entirely inside the inference engine.

use lsim_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Description of one fuzzy linguistic variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyVariable {
    label: String,
    universe: (Real, Real),
}

impl FuzzyVariable {
    /// Create a variable description.
    ///
    /// # Arguments
    ///
    /// * `label` - Name the engine knows the variable by
    /// * `min`, `max` - Universe-of-discourse bounds (`min < max`)
    pub fn new(label: impl Into<String>, min: Real, max: Real) -> ControlResult<Self> {
        if !(min < max) {
            return Err(ControlError::InvalidArg {
                what: "universe min must be less than universe max",
            });
        }
        Ok(Self {
            label: label.into(),
            universe: (min, max),
        })
    }

    /// Label the engine knows the variable by.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Universe-of-discourse bounds.
    pub fn universe(&self) -> (Real, Real) {
        self.universe
    }

    /// Clamp a crisp value into the universe bounds.
    pub fn clip(&self, value: Real) -> Real {
        value.clamp(self.universe.0, self.universe.1)
    }
}
