//! Parallel execution of independent runs.
//!
//! Each run owns a freshly built controller, so runs share no state and the
//! single-run ordering guarantee of [`run_loop`] is untouched.

use lsim_controls::Controller;
use rayon::prelude::*;
use tracing::debug;

use crate::error::SimResult;
use crate::runner::{LoopOptions, Trajectory, run_loop};

/// Run one simulation per builder, in parallel.
///
/// Builders typically capture a parameter set each (a gain sweep, say) and
/// construct the controller for it. Results come back in builder order.
pub fn run_batch<C, B>(builders: &[B], opts: &LoopOptions) -> Vec<SimResult<Trajectory>>
where
    C: Controller,
    B: Fn() -> C + Sync,
{
    let results: Vec<_> = builders
        .par_iter()
        .map(|build| run_loop(&mut build(), opts))
        .collect();
    debug!(runs = results.len(), "batch complete");
    results
}
