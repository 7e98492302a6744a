//! Run-level counters reported to observers and returned from `run`.

use std::fmt;

use swarm_core::{EventType, Mode};

/// Snapshot handed to [`RunObserver::on_batch_end`][crate::RunObserver::on_batch_end].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based index of the batch that just finished.
    pub batch:   u64,
    pub mode:    Mode,
    /// Records emitted so far in the whole run.
    pub emitted: u64,
    pub target:  u64,
}

impl BatchProgress {
    /// Fraction of the budget spent, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.emitted as f64 / self.target.max(1) as f64
    }
}

/// Totals for a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: u64,
    pub batches: u64,
    /// Zone IDs allocated (including zones of the final batch that were
    /// cut off by the budget).
    pub zones:   u64,
    events:      [u64; 4],
}

impl RunSummary {
    /// Records emitted with the given event type.
    #[inline]
    pub fn count(&self, event: EventType) -> u64 {
        self.events[event.index()]
    }

    #[inline]
    pub(crate) fn record(&mut self, event: EventType) {
        self.events[event.index()] += 1;
        self.records += 1;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records in {} batches ({} zones):", self.records, self.batches, self.zones)?;
        for event in EventType::ALL {
            write!(f, " {}={}", event, self.count(event))?;
        }
        Ok(())
    }
}
