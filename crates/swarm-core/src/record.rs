//! The telemetry record and its enumerated fields.
//!
//! Records are plain `Copy` values, created once and never mutated.  Wire
//! encodings (literal event names, integer mode codes, state labels) live on
//! the enums so every writer and reader agrees on them.

use std::fmt;

use crate::{DroneId, Point, ZoneId};

/// Decimal places kept on `timestamp` / `mission_time`.
pub const TIMESTAMP_DECIMALS: i32 = 3;

/// Decimal places kept on `battery`.
pub const BATTERY_DECIMALS: i32 = 1;

/// Round `value` half-away-from-zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Round a timestamp to the generator's precision (milliseconds).
#[inline]
pub fn round_timestamp(secs: f64) -> f64 {
    round_to(secs, TIMESTAMP_DECIMALS)
}

/// Round a battery level to the generator's precision (0.1 %).
#[inline]
pub fn round_battery(percent: f64) -> f64 {
    round_to(percent, BATTERY_DECIMALS)
}

// ── EventType ─────────────────────────────────────────────────────────────────

/// What happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    ZoneDiscovered,
    ZoneClaimed,
    ZoneProcessed,
    DroneDisabled,
}

impl EventType {
    /// All variants in wire order.
    pub const ALL: [EventType; 4] = [
        EventType::ZoneDiscovered,
        EventType::ZoneClaimed,
        EventType::ZoneProcessed,
        EventType::DroneDisabled,
    ];

    /// The literal written to the `event_type` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::ZoneDiscovered => "zone_discovered",
            EventType::ZoneClaimed    => "zone_claimed",
            EventType::ZoneProcessed  => "zone_processed",
            EventType::DroneDisabled  => "drone_disabled",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<EventType> {
        EventType::ALL.into_iter().find(|e| e.as_str() == s)
    }

    /// Dense index `0..4`, for per-type counters.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Mission type, chosen once per batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Weed clearing; processed zones are labelled `WORKED`.
    Weeds,
    /// Irrigation; processed zones are labelled `PAINTED`.
    Irrigation,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Weeds, Mode::Irrigation];

    /// Integer code written to the `mode` column.
    pub const fn code(self) -> u8 {
        match self {
            Mode::Weeds      => 0,
            Mode::Irrigation => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Mode> {
        match code {
            0 => Some(Mode::Weeds),
            1 => Some(Mode::Irrigation),
            _ => None,
        }
    }

    /// The state label a zone ends in once processed under this mode.
    pub const fn processed_state(self) -> DroneState {
        match self {
            Mode::Weeds      => DroneState::Worked,
            Mode::Irrigation => DroneState::Painted,
        }
    }
}

// ── DroneState ────────────────────────────────────────────────────────────────

/// Label written to the `state` column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DroneState {
    Scout,
    Claiming,
    Worked,
    Painted,
    Disabled,
}

impl DroneState {
    pub const fn as_str(self) -> &'static str {
        match self {
            DroneState::Scout    => "SCOUT",
            DroneState::Claiming => "CLAIMING",
            DroneState::Worked   => "WORKED",
            DroneState::Painted  => "PAINTED",
            DroneState::Disabled => "DISABLED",
        }
    }

    pub fn parse(s: &str) -> Option<DroneState> {
        [
            DroneState::Scout,
            DroneState::Claiming,
            DroneState::Worked,
            DroneState::Painted,
            DroneState::Disabled,
        ]
        .into_iter()
        .find(|st| st.as_str() == s)
    }
}

impl fmt::Display for DroneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TelemetryRecord ───────────────────────────────────────────────────────────

/// One emitted telemetry event.
///
/// `timestamp` is chain-local (seconds since the chain's own origin), so
/// records from different zones may interleave in time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TelemetryRecord {
    pub timestamp: f64,
    pub event:     EventType,
    /// `None` for scout discoveries.
    pub drone:     Option<DroneId>,
    /// `None` for fleet-level events (drone failures).
    pub zone:      Option<ZoneId>,
    pub position:  Point,
    pub battery:   f64,
    pub state:     DroneState,
    pub mode:      Mode,
}

impl TelemetryRecord {
    /// Mission clock; mirrors `timestamp` on every record.
    #[inline]
    pub fn mission_time(&self) -> f64 {
        self.timestamp
    }
}
