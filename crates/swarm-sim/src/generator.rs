//! The `Generator` struct and its batch loop.

use swarm_chain::{ChainParams, Zone, ZoneChain, disabled_record, expand_zone};
use swarm_core::{Mode, RunConfig, SimRng, TelemetryRecord, ZoneId, ZoneRng};
use swarm_spatial::{AreaSampler, SpatialResult};
use tracing::{debug, info};

use crate::budget::{RecordBudget, ZoneBlock, ZoneIdAllocator};
use crate::{BatchProgress, RecordSink, RunObserver, RunSummary, SimError, SimResult};

/// The batch driver.
///
/// Each batch:
///
/// 1. **Mode**: pick Weeds or Irrigation for every record of the batch.
/// 2. **Zones**: allocate `zones_per_batch` consecutive zone IDs, sample a
///    position for each and expand its event chain (on Rayon's pool with
///    the `parallel` feature).
/// 3. **Emit**: hand records to the sink one at a time, in zone order.
///    Every record passes through the [`RecordBudget`]; the instant the
///    target is reached the run ends, even in the middle of a chain.
/// 4. **Failure**: with probability `failure`, emit one `drone_disabled`
///    record, subject to the same budget check.
///
/// Batches repeat until the budget is spent.  Create via
/// [`GeneratorBuilder`][crate::GeneratorBuilder].
pub struct Generator {
    pub(crate) config:  RunConfig,
    pub(crate) sampler: AreaSampler,
    pub(crate) chain:   ChainParams,
    /// Batch-level decisions only; zones use their own `ZoneRng`.
    pub(crate) rng:     SimRng,
    pub(crate) budget:  RecordBudget,
    pub(crate) zones:   ZoneIdAllocator,
    pub(crate) summary: RunSummary,
}

impl Generator {
    // ── Public API ────────────────────────────────────────────────────────

    /// Generate until exactly `config.target_records` records have been
    /// written to `sink`, then finish the sink.
    ///
    /// A sink error aborts immediately; whatever was written is invalid.
    pub fn run<S, O>(&mut self, sink: &mut S, observer: &mut O) -> SimResult<RunSummary>
    where
        S: RecordSink,
        O: RunObserver,
    {
        while !self.budget.is_exhausted() {
            let mode = self.next_mode();
            self.run_batch(mode, sink)?;
            self.summary.batches += 1;

            let progress = BatchProgress {
                batch:   self.summary.batches,
                mode,
                emitted: self.budget.emitted(),
                target:  self.budget.target(),
            };
            debug!(
                batch = progress.batch,
                mode = mode.code(),
                emitted = progress.emitted,
                "batch complete"
            );
            observer.on_batch_end(&progress);
        }

        sink.finish().map_err(sink_error)?;
        self.summary.zones = self.zones.peek().0;
        info!(
            records = self.summary.records,
            batches = self.summary.batches,
            zones = self.summary.zones,
            "generation finished"
        );
        observer.on_run_end(&self.summary);
        Ok(self.summary.clone())
    }

    #[inline]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[inline]
    pub fn sampler(&self) -> &AreaSampler {
        &self.sampler
    }

    #[inline]
    pub fn budget(&self) -> &RecordBudget {
        &self.budget
    }

    // ── Batch processing ──────────────────────────────────────────────────

    fn next_mode(&mut self) -> Mode {
        Mode::ALL[self.rng.gen_range(0..Mode::ALL.len())]
    }

    fn run_batch<S: RecordSink>(&mut self, mode: Mode, sink: &mut S) -> SimResult<()> {
        let block = self.zones.allocate(self.config.zones_per_batch as u64);

        if !self.emit_zones(block, mode, sink)? {
            return Ok(());
        }

        if self.rng.gen_bool(self.config.probabilities.failure) {
            let record = disabled_record(
                self.config.drone_count,
                self.config.base_position,
                mode,
                self.rng.inner(),
            );
            self.emit(&record, sink)?;
        }
        Ok(())
    }

    /// Expand and emit every zone of `block`.  Returns `false` once the
    /// budget is spent.
    #[cfg(not(feature = "parallel"))]
    fn emit_zones<S: RecordSink>(&mut self, block: ZoneBlock, mode: Mode, sink: &mut S) -> SimResult<bool> {
        for id in block.ids() {
            let chain = expand_one(&self.sampler, &self.chain, self.config.seed, id, mode)?;
            if !self.emit_chain(&chain, sink)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Expand every zone of `block` in parallel, then emit in zone order.
    /// Returns `false` once the budget is spent.
    ///
    /// Sampling errors are held back until their zone is reached, so a
    /// failure in a zone the budget never gets to is ignored exactly as in
    /// the sequential build.
    #[cfg(feature = "parallel")]
    fn emit_zones<S: RecordSink>(&mut self, block: ZoneBlock, mode: Mode, sink: &mut S) -> SimResult<bool> {
        let chains = expand_block(&self.sampler, &self.chain, self.config.seed, &block, mode);
        for chain in chains {
            if !self.emit_chain(&chain?, sink)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn emit_chain<S: RecordSink>(&mut self, chain: &ZoneChain, sink: &mut S) -> SimResult<bool> {
        for record in chain.records() {
            if !self.emit(record, sink)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Write one record if the budget allows.  Returns `true` while budget
    /// remains after this record.
    fn emit<S: RecordSink>(&mut self, record: &TelemetryRecord, sink: &mut S) -> SimResult<bool> {
        if !self.budget.try_consume() {
            return Ok(false);
        }
        sink.write_record(record).map_err(sink_error)?;
        self.summary.record(record.event);
        Ok(!self.budget.is_exhausted())
    }
}

// ── Zone expansion ────────────────────────────────────────────────────────────

/// Sample and expand one zone.  Depends only on its arguments, so it can run
/// on any thread.
pub(crate) fn expand_one(
    sampler: &AreaSampler,
    chain:   &ChainParams,
    seed:    u64,
    id:      ZoneId,
    mode:    Mode,
) -> SpatialResult<ZoneChain> {
    let mut rng = ZoneRng::new(seed, id);
    let position = sampler.sample(rng.inner())?;
    Ok(expand_zone(Zone { id, position }, mode, chain, rng.inner()))
}

/// Expand every zone of `block` on Rayon's pool.  Results come back in zone
/// order and equal `block.ids().map(expand_one)`.
#[cfg(feature = "parallel")]
pub(crate) fn expand_block(
    sampler: &AreaSampler,
    chain:   &ChainParams,
    seed:    u64,
    block:   &ZoneBlock,
    mode:    Mode,
) -> Vec<SpatialResult<ZoneChain>> {
    use rayon::prelude::*;

    block
        .raw()
        .into_par_iter()
        .map(|raw| expand_one(sampler, chain, seed, ZoneId(raw), mode))
        .collect()
}

fn sink_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> SimError {
    SimError::Sink(Box::new(e))
}
