//! Progress reporting and cancellation between bundles.

use std::ops::ControlFlow;

use snomed_types::ModuleVersionKey;

/// Progress of an import run, reported after each bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    /// Bundles finished so far, including this one.
    pub completed: usize,
    /// Bundles in the run.
    pub total: usize,
    /// Root of the bundle just finished.
    pub root: ModuleVersionKey,
}

/// Called between bundles; returning `Break` stops the run.
///
/// A bundle is never interrupted half way. In parallel runs the checkpoint
/// is called from worker threads, and bundles already started still finish.
///
/// Closures implement it:
///
/// ```
/// use std::ops::ControlFlow;
/// use snomed_axioms::{Checkpoint, ImportProgress};
///
/// fn accepts(_: &impl Checkpoint) {}
///
/// accepts(&|progress: &ImportProgress| {
///     if progress.completed >= 10 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// ```
pub trait Checkpoint: Sync {
    /// Reports a finished bundle.
    fn bundle_done(&self, progress: &ImportProgress) -> ControlFlow<()>;
}

impl<F> Checkpoint for F
where
    F: Fn(&ImportProgress) -> ControlFlow<()> + Sync,
{
    fn bundle_done(&self, progress: &ImportProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Never stops the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunToCompletion;

impl Checkpoint for RunToCompletion {
    fn bundle_done(&self, _progress: &ImportProgress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
