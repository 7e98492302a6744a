//! Run configuration.
//!
//! Every knob of the generator is a field here with a default matching the
//! reference field survey (1 M records over a 1000 × 300 rectangle, 10
//! drones, 200 zones per batch).  Applications typically start from
//! [`RunConfig::default`], overlay a JSON file (with the `serde` feature) and
//! then command-line flags.

use std::path::PathBuf;

use crate::{Point, SwarmError, SwarmResult};

/// Probabilities of the optional branches of the generation process.
///
/// Tests pin these to `0.0` or `1.0` to force deterministic chain shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BranchProbabilities {
    /// Chance that a discovered zone is claimed by a drone.  Default 0.9.
    pub claim: f64,
    /// Chance that a claimed zone is processed.  Default 0.95.
    pub process: f64,
    /// Chance that a batch ends with one `drone_disabled` record.  Default 0.3.
    pub failure: f64,
}

impl Default for BranchProbabilities {
    fn default() -> Self {
        Self {
            claim:   0.9,
            process: 0.95,
            failure: 0.3,
        }
    }
}

impl BranchProbabilities {
    fn validate(&self) -> SwarmResult<()> {
        for (name, p) in [("claim", self.claim), ("process", self.process), ("failure", self.failure)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SwarmError::Config(format!(
                    "{name} probability must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

/// Top-level generator configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Exact number of records the run must emit.
    pub target_records: u64,

    /// Destination file for the CSV stream.
    pub output_path: PathBuf,

    /// Survey boundary, in order.  Validated by `swarm-spatial`.
    pub polygon: Vec<Point>,

    /// Where failed drones are reported (the charging base).
    pub base_position: Point,

    /// Fleet size; drone IDs are drawn from `0..drone_count`.
    pub drone_count: u32,

    /// Zones sampled per batch.  All zones of a batch share one mode.
    pub zones_per_batch: u32,

    /// Master RNG seed.  The same seed and config always produce identical
    /// output.
    pub seed: u64,

    pub probabilities: BranchProbabilities,

    /// Rejection-sampling guard: candidate draws allowed per zone before the
    /// sampler gives up.
    pub max_sample_attempts: u32,

    /// Progress is reported every N batches.  0 disables progress reports.
    pub progress_interval_batches: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_records:            1_000_000,
            output_path:               PathBuf::from("data/drone_events_million.csv"),
            polygon:                   vec![
                Point::new(200.0, 200.0),
                Point::new(1200.0, 200.0),
                Point::new(1200.0, 500.0),
                Point::new(200.0, 500.0),
            ],
            base_position:             Point::new(800.0, 650.0),
            drone_count:               10,
            zones_per_batch:           200,
            seed:                      42,
            probabilities:             BranchProbabilities::default(),
            max_sample_attempts:       100_000,
            progress_interval_batches: 100,
            num_threads:               None,
        }
    }
}

impl RunConfig {
    /// Check every scalar setting.  The polygon itself is validated when the
    /// survey area is constructed.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.target_records == 0 {
            return Err(SwarmError::Config("target_records must be positive".into()));
        }
        if self.drone_count == 0 {
            return Err(SwarmError::Config("drone_count must be positive".into()));
        }
        if self.zones_per_batch == 0 {
            return Err(SwarmError::Config("zones_per_batch must be positive".into()));
        }
        if self.max_sample_attempts == 0 {
            return Err(SwarmError::Config("max_sample_attempts must be positive".into()));
        }
        if !self.base_position.is_finite() {
            return Err(SwarmError::Config(format!(
                "base_position must be finite, got {:?}",
                self.base_position
            )));
        }
        if self.num_threads == Some(0) {
            return Err(SwarmError::Config("num_threads must be positive when set".into()));
        }
        self.probabilities.validate()
    }

    /// Records a batch produces on average with the configured
    /// probabilities.  Used for progress estimates only.
    pub fn expected_records_per_batch(&self) -> f64 {
        let p = &self.probabilities;
        let per_zone = 1.0 + p.claim * (1.0 + p.process);
        self.zones_per_batch as f64 * per_zone + p.failure
    }
}
