//! The flat CSV row and its mapping to [`TelemetryRecord`].
//!
//! Column order is the external contract and must stay stable:
//!
//! ```text
//! timestamp,event_type,drone_id,zone_id,x,y,battery,state,mode,mission_time
//! ```
//!
//! Timestamps and battery are pre-rounded, so the writer's shortest
//! round-trip form is already plain decimal for them.  Coordinates come from
//! user-supplied polygons of any scale and are forced to plain decimal.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use swarm_core::{DroneId, DroneState, EventType, Mode, Point, TelemetryRecord, ZoneId};

/// Header row, in column order.
pub const HEADER: [&str; 10] = [
    "timestamp",
    "event_type",
    "drone_id",
    "zone_id",
    "x",
    "y",
    "battery",
    "state",
    "mode",
    "mission_time",
];

/// One CSV row.  String columns borrow from the record being written or the
/// `StringRecord` being read, so neither direction allocates per row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsvRow<'a> {
    pub timestamp:    f64,
    pub event_type:   &'a str,
    pub drone_id:     i64,
    pub zone_id:      i64,
    #[serde(serialize_with = "plain_decimal")]
    pub x:            f64,
    #[serde(serialize_with = "plain_decimal")]
    pub y:            f64,
    pub battery:      f64,
    pub state:        &'a str,
    pub mode:         u8,
    pub mission_time: f64,
}

impl CsvRow<'static> {
    pub fn from_record(r: &TelemetryRecord) -> Self {
        CsvRow {
            timestamp:    r.timestamp,
            event_type:   r.event.as_str(),
            drone_id:     DroneId::to_wire(r.drone),
            zone_id:      ZoneId::to_wire(r.zone),
            x:            r.position.x,
            y:            r.position.y,
            battery:      r.battery,
            state:        r.state.as_str(),
            mode:         r.mode.code(),
            mission_time: r.mission_time(),
        }
    }
}

impl CsvRow<'_> {
    /// Decode into a typed record.  Returns a description of the first bad
    /// column on failure.
    pub fn to_record(&self) -> Result<TelemetryRecord, String> {
        let event = EventType::parse(self.event_type)
            .ok_or_else(|| format!("unknown event_type `{}`", self.event_type))?;
        let state = DroneState::parse(self.state)
            .ok_or_else(|| format!("unknown state `{}`", self.state))?;
        let mode = Mode::from_code(self.mode)
            .ok_or_else(|| format!("unknown mode `{}`", self.mode))?;
        let drone = DroneId::from_wire(self.drone_id)
            .map_err(|_| format!("drone_id {} out of range", self.drone_id))?;
        let zone = ZoneId::from_wire(self.zone_id)
            .map_err(|_| format!("zone_id {} out of range", self.zone_id))?;

        Ok(TelemetryRecord {
            timestamp: self.timestamp,
            event,
            drone,
            zone,
            position: Point::new(self.x, self.y),
            battery: self.battery,
            state,
            mode,
        })
    }
}

/// `f64` in shortest round-trip digits without an exponent; whole numbers
/// keep a trailing `.0`.
struct PlainDecimal(f64);

impl fmt::Display for PlainDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn plain_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&PlainDecimal(*value))
}
