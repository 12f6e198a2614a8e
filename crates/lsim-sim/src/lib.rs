//! Closed-loop simulation driver for loopsim.
//!
//! Provides:
//! - Fixed-length discrete stepping of a controller against its process model
//! - Append-only trajectory recording for the external plotting layer
//! - Parallel execution of independent runs
//!
//! The loop itself is strictly sequential: `trajectory[k+1] = trajectory[k] +
//! controller.step(trajectory[k])`. There is no convergence check and no early
//! exit; the run length is the caller's choice.

pub mod batch;
pub mod error;
pub mod runner;

// Re-exports for public API
pub use batch::run_batch;
pub use error::{SimError, SimResult};
pub use runner::{LoopOptions, Trajectory, run_loop};
