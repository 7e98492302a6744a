//! Run observer trait for progress reporting.

use crate::{BatchProgress, RunSummary};

/// Callbacks invoked by [`Generator::run`][crate::Generator::run].
///
/// Purely a side channel: nothing an observer does affects what is
/// generated.  All methods have default no-op implementations.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl RunObserver for ProgressPrinter {
///     fn on_batch_end(&mut self, p: &BatchProgress) {
///         if p.batch % self.interval == 0 {
///             println!("{} / {} records", p.emitted, p.target);
///         }
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called after every batch, including the final, possibly truncated one.
    fn on_batch_end(&mut self, _progress: &BatchProgress) {}

    /// Called once after the sink has been finished.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
