//! Drone-failure records.
//!
//! A failure is fleet-level: it is not tied to a zone, and the drone is
//! reported at the base position with a low battery.

use rand::Rng;

use swarm_core::{
    DroneId, DroneState, EventType, Mode, Point, TelemetryRecord, round_battery, round_timestamp,
};

use crate::chain::uniform;
use crate::params::{DISCOVERY_WINDOW_SECS, FAILURE_BATTERY_PCT};

/// Build one `drone_disabled` record for a random drone of the fleet.
pub fn disabled_record<R: Rng + ?Sized>(
    drone_count: u32,
    base:        Point,
    mode:        Mode,
    rng:         &mut R,
) -> TelemetryRecord {
    let drone = DroneId(rng.gen_range(0..drone_count.max(1)));
    let timestamp = round_timestamp(uniform(rng, DISCOVERY_WINDOW_SECS));
    let battery = round_battery(uniform(rng, FAILURE_BATTERY_PCT));

    TelemetryRecord {
        timestamp,
        event: EventType::DroneDisabled,
        drone: Some(drone),
        zone: None,
        position: base,
        battery,
        state: DroneState::Disabled,
        mode,
    }
}
