//! `swarm-core` — foundational types for the drone swarm telemetry generator.
//!
//! This crate is a dependency of every other `swarm-*` crate.  It has no
//! `swarm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `ZoneId`, `DroneId`, wire sentinel helpers                |
//! | [`geo`]     | `Point`                                                   |
//! | [`record`]  | `TelemetryRecord`, `EventType`, `Mode`, `DroneState`      |
//! | [`config`]  | `RunConfig`, `BranchProbabilities`                        |
//! | [`rng`]     | `ZoneRng` (per-zone), `SimRng` (run-level)                |
//! | [`error`]   | `SwarmError`, `SwarmResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points, `Mode` and  |
//! |         | the configuration types.                                   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod record;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BranchProbabilities, RunConfig};
pub use error::{SwarmError, SwarmResult};
pub use geo::Point;
pub use ids::{DroneId, WIRE_SENTINEL, ZoneId};
pub use record::{DroneState, EventType, Mode, TelemetryRecord, round_battery, round_timestamp};
pub use rng::{SimRng, ZoneRng};
