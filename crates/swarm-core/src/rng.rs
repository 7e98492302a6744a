//! Deterministic per-zone and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each zone gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR ((zone_id + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive zone IDs uniformly across the seed space.  The
//! `+ 1` keeps zone 0 off the raw run seed, which the run-level [`SimRng`]
//! already uses.  This means:
//!
//! - A zone's position and event chain depend only on the run seed and its
//!   ID, never on which thread expanded it or in what order.
//! - Sequential and Rayon-parallel runs write byte-identical files.
//! - All RNG calls are local to the owning thread; no synchronisation needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ZoneId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── ZoneRng ───────────────────────────────────────────────────────────────────

/// Per-zone deterministic RNG.
///
/// Created on demand when a zone is sampled and dropped together with the
/// zone once its chain is emitted.  The type is `!Sync` to prevent
/// accidental sharing across threads.
pub struct ZoneRng(SmallRng);

impl ZoneRng {
    /// Seed deterministically from the run's seed and a zone ID.
    pub fn new(run_seed: u64, zone: ZoneId) -> Self {
        let seed = run_seed ^ zone.0.wrapping_add(1).wrapping_mul(MIXING_CONSTANT);
        ZoneRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for per-batch decisions (mission mode, drone-failure
/// injection).
///
/// Only the driver thread touches it, so batch decisions happen in a fixed
/// order regardless of how zones are expanded.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
