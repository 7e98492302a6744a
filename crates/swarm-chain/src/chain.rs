//! The zone event chain: discovery → claim → processing.
//!
//! ```text
//! discovered ──p_claim──▶ claimed ──p_process──▶ processed
//!     │                      │
//!     └── (1 − p_claim) ──▶ end   └── (1 − p_process) ──▶ end
//! ```
//!
//! Every stage after the first is gated by an independent draw, so a chain
//! holds 1, 2 or 3 records.  All draws come from the zone's own RNG; nothing
//! is shared between zones, and battery levels are drawn fresh per chain
//! rather than tracked per drone.

use rand::Rng;

use swarm_core::{
    DroneId, DroneState, EventType, Mode, Point, TelemetryRecord, ZoneId, round_battery,
    round_timestamp,
};

use crate::params::{
    CLAIM_BATTERY_PCT, CLAIM_DELAY_SECS, ChainParams, DISCOVERY_WINDOW_SECS, PROCESS_DELAY_SECS,
    PROCESS_DRAIN_PCT, SCOUT_BATTERY_PCT,
};

/// A sampled zone, alive only until its chain is emitted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Zone {
    pub id:       ZoneId,
    pub position: Point,
}

/// The 1–3 records generated for one zone, in emission order.
///
/// A processed record only ever exists alongside a claimed one.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneChain {
    discovered: TelemetryRecord,
    claimed:    Option<TelemetryRecord>,
    processed:  Option<TelemetryRecord>,
}

impl ZoneChain {
    #[inline]
    pub fn discovered(&self) -> &TelemetryRecord {
        &self.discovered
    }

    #[inline]
    pub fn claimed(&self) -> Option<&TelemetryRecord> {
        self.claimed.as_ref()
    }

    #[inline]
    pub fn processed(&self) -> Option<&TelemetryRecord> {
        self.processed.as_ref()
    }

    /// Budget this chain consumes if emitted in full.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.claimed.is_some() as usize + self.processed.is_some() as usize
    }

    /// Records in emission order.
    pub fn records(&self) -> impl Iterator<Item = &TelemetryRecord> + '_ {
        std::iter::once(&self.discovered)
            .chain(self.claimed.iter())
            .chain(self.processed.iter())
    }
}

#[inline]
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    rng.gen_range(lo..hi)
}

/// Expand `zone` into its event chain under the batch's `mode`.
pub fn expand_zone<R: Rng + ?Sized>(
    zone:   Zone,
    mode:   Mode,
    params: &ChainParams,
    rng:    &mut R,
) -> ZoneChain {
    let stage = |timestamp: f64, event, drone, battery, state| TelemetryRecord {
        timestamp,
        event,
        drone,
        zone: Some(zone.id),
        position: zone.position,
        battery,
        state,
        mode,
    };

    // ── Discovery (always) ────────────────────────────────────────────────
    let discovered_at = round_timestamp(uniform(rng, DISCOVERY_WINDOW_SECS));
    let discovered = stage(
        discovered_at,
        EventType::ZoneDiscovered,
        None,
        SCOUT_BATTERY_PCT,
        DroneState::Scout,
    );

    if !rng.gen_bool(params.claim_probability()) {
        return ZoneChain { discovered, claimed: None, processed: None };
    }

    // ── Claim ─────────────────────────────────────────────────────────────
    let drone = DroneId(rng.gen_range(0..params.drone_count()));
    let claimed_at = round_timestamp(discovered_at + uniform(rng, CLAIM_DELAY_SECS));
    let claim_battery = round_battery(uniform(rng, CLAIM_BATTERY_PCT));
    let claimed = stage(
        claimed_at,
        EventType::ZoneClaimed,
        Some(drone),
        claim_battery,
        DroneState::Claiming,
    );

    if !rng.gen_bool(params.process_probability()) {
        return ZoneChain { discovered, claimed: Some(claimed), processed: None };
    }

    // ── Processing ────────────────────────────────────────────────────────
    let processed_at = round_timestamp(claimed_at + uniform(rng, PROCESS_DELAY_SECS));
    let processed = stage(
        processed_at,
        EventType::ZoneProcessed,
        Some(drone),
        round_battery(claim_battery - uniform(rng, PROCESS_DRAIN_PCT)),
        mode.processed_state(),
    );

    ZoneChain { discovered, claimed: Some(claimed), processed: Some(processed) }
}
