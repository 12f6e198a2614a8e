//! Discrete-time feedback controllers for loopsim.
//!
//! This crate provides the controller side of a closed scalar loop: a shared
//! stepping contract, a classical PID variant and a rule-based (fuzzy) variant
//! that delegates control-law evaluation to an external inference engine.
//!
//! # Architecture
//!
//! - Signals are scalar [`lsim_core::Real`] values
//! - A [`Controller`] turns one feedback sample into one process response
//! - The process model is a caller-supplied pure function, never inspected
//! - The fuzzy variant composes an [`InferenceEngine`] capability; membership
//!   functions and rule bases live entirely inside the engine
//!
//! # Design Principles
//!
//! - **Explicit state**: controller memory is a value owned by the driver,
//!   mutated only by `step`/`clear`
//! - **Propagate, don't mask**: an inference result with no rule coverage
//!   surfaces as an error instead of a substituted number
//! - **Opt-in guards**: output saturation and engine-side caching are
//!   explicit options, off or on per the documented defaults

pub mod controller;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod variable;

pub use controller::{Controller, PidController, PidGains};
pub use error::{ControlError, ControlResult};
pub use fuzzy::{EngineOptions, FuzzyController, InferenceEngine};
pub use model::ProcessModel;
pub use variable::FuzzyVariable;
