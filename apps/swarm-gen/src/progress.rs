use std::time::Instant;

use memory_stats::memory_stats;
use tracing::info;

use swarm_sim::{BatchProgress, RunObserver, RunSummary};

/// Resident memory in MiB, or 0 where the platform does not report it.
pub fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

/// Logs a progress line every `interval` batches and the totals at the end.
pub struct ProgressLogger {
    interval: u64,
    start:    Instant,
    elapsed:  f64,
}

impl ProgressLogger {
    pub fn new(interval: u64) -> Self {
        Self { interval, start: Instant::now(), elapsed: 0.0 }
    }

    /// Wall-clock seconds from construction to the end of the run.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl RunObserver for ProgressLogger {
    fn on_batch_end(&mut self, p: &BatchProgress) {
        if self.interval == 0 || p.batch % self.interval != 0 {
            return;
        }
        let secs = self.start.elapsed().as_secs_f64();
        info!(
            batch = p.batch,
            mode = ?p.mode,
            emitted = p.emitted,
            target = p.target,
            "{:5.1} %  {:.2}s  ({:.2} M rec/s)  mem={:.0} MB",
            p.fraction() * 100.0,
            secs,
            p.emitted as f64 / secs.max(1e-9) / 1_000_000.0,
            mem_mb(),
        );
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        self.elapsed = self.start.elapsed().as_secs_f64();
        info!(
            "generated {} records in {:.3}s  ({:.2} M rec/s)  mem={:.0} MB",
            summary.records,
            self.elapsed,
            summary.records as f64 / self.elapsed.max(1e-9) / 1_000_000.0,
            mem_mb(),
        );
    }
}
