//! Chain parameters: fleet size, branch probabilities, and the uniform
//! ranges every stage draws from.

use swarm_core::RunConfig;

use crate::{ChainError, ChainResult};

/// Discovery timestamps are drawn from this window (seconds).
pub const DISCOVERY_WINDOW_SECS: (f64, f64) = (0.0, 300.0);

/// Delay between discovery and claim (seconds).
pub const CLAIM_DELAY_SECS: (f64, f64) = (1.0, 60.0);

/// Delay between claim and processing (seconds).
pub const PROCESS_DELAY_SECS: (f64, f64) = (1.0, 10.0);

/// Battery level (%) of the drone at claim time.
pub const CLAIM_BATTERY_PCT: (f64, f64) = (40.0, 100.0);

/// Battery consumed (%) by processing a zone.
pub const PROCESS_DRAIN_PCT: (f64, f64) = (5.0, 20.0);

/// Battery level (%) reported by a disabled drone.
pub const FAILURE_BATTERY_PCT: (f64, f64) = (0.0, 30.0);

/// Scouts always report a full battery.
pub const SCOUT_BATTERY_PCT: f64 = 100.0;

/// Parameters shared by every chain of a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainParams {
    drone_count:         u32,
    claim_probability:   f64,
    process_probability: f64,
}

impl ChainParams {
    pub fn new(drone_count: u32, claim_probability: f64, process_probability: f64) -> ChainResult<Self> {
        if drone_count == 0 {
            return Err(ChainError::Config("drone_count must be positive".into()));
        }
        for (name, p) in [("claim", claim_probability), ("process", process_probability)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ChainError::Config(format!("{name} probability {p} outside [0, 1]")));
            }
        }
        Ok(Self { drone_count, claim_probability, process_probability })
    }

    /// Pull the chain-relevant settings out of a run configuration.
    pub fn from_config(config: &RunConfig) -> ChainResult<Self> {
        Self::new(
            config.drone_count,
            config.probabilities.claim,
            config.probabilities.process,
        )
    }

    #[inline]
    pub fn drone_count(&self) -> u32 {
        self.drone_count
    }

    #[inline]
    pub fn claim_probability(&self) -> f64 {
        self.claim_probability
    }

    #[inline]
    pub fn process_probability(&self) -> f64 {
        self.process_probability
    }
}
