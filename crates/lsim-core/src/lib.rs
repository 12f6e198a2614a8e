//! lsim-core: stable foundation for loopsim.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LoopError, LoopResult};
pub use numeric::*;
