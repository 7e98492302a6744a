//! Stream auditor: re-checks a produced telemetry file against the
//! generator's guarantees without loading it into memory.
//!
//! # Checks
//!
//! | Record            | Rule                                                     |
//! |-------------------|----------------------------------------------------------|
//! | every             | `mission_time == timestamp`                              |
//! | `zone_discovered` | no drone, battery 100, state `SCOUT`                     |
//! | `zone_claimed`    | directly follows its zone's discovery; battery in        |
//! |                   | [40, 100]; state `CLAIMING`                              |
//! | `zone_processed`  | directly follows its zone's claim by the same drone;     |
//! |                   | battery below the claim's; `WORKED`/`PAINTED` per mode   |
//! | `drone_disabled`  | zone −1; battery in [0, 30]; state `DISABLED`            |
//! | zone-scoped       | inside the survey polygon (when one is supplied)         |
//!
//! Malformed rows and a wrong header are hard errors; rule violations are
//! collected (up to `max_violations`) and counted.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use swarm_core::{DroneId, DroneState, EventType, TelemetryRecord, ZoneId};
use swarm_spatial::SurveyArea;

use crate::OutputResult;
use crate::reader::{ReadRow, RecordReader};

/// What to check beyond the per-record rules.
#[derive(Clone, Debug)]
pub struct AuditRules {
    /// Zone-scoped records must lie strictly inside this area.
    pub area:             Option<SurveyArea>,
    /// The file must contain exactly this many data rows.
    pub expected_records: Option<u64>,
    /// Violations kept verbatim in the report; the rest are only counted.
    pub max_violations:   usize,
}

impl Default for AuditRules {
    fn default() -> Self {
        Self { area: None, expected_records: None, max_violations: 100 }
    }
}

/// One broken rule.  `row` 0 refers to the file as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub row:     u64,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Outcome of an audit: per-type counts, fleet usage, and violations.
#[derive(Clone, Debug, Default)]
pub struct AuditReport {
    pub records:         u64,
    events:              [u64; 4],
    pub drones:          BTreeSet<DroneId>,
    pub max_zone:        Option<ZoneId>,
    pub violations:      Vec<Violation>,
    pub violation_count: u64,
}

impl AuditReport {
    #[inline]
    pub fn count(&self, event: EventType) -> u64 {
        self.events[event.index()]
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.violation_count == 0
    }

    /// Share of all records with the given event type, in `[0, 1]`.
    pub fn share(&self, event: EventType) -> f64 {
        self.count(event) as f64 / self.records.max(1) as f64
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "records:        {}", self.records)?;
        writeln!(f, "unique drones:  {}", self.drones.len())?;
        for event in EventType::ALL {
            writeln!(
                f,
                "  {:<16} {:>10}  ({:5.1} %)",
                event.as_str(),
                self.count(event),
                self.share(event) * 100.0
            )?;
        }
        write!(f, "violations:     {}", self.violation_count)
    }
}

// ── Chain tracking ────────────────────────────────────────────────────────────

/// The stage the most recent chain has reached.
#[derive(Copy, Clone, Debug)]
enum OpenChain {
    Discovered { zone: ZoneId },
    Claimed { zone: ZoneId, drone: Option<DroneId>, battery: f64 },
    Processed,
}

struct Auditor<'r> {
    rules:  &'r AuditRules,
    report: AuditReport,
    chain:  Option<OpenChain>,
}

impl<'r> Auditor<'r> {
    fn new(rules: &'r AuditRules) -> Self {
        Self { rules, report: AuditReport::default(), chain: None }
    }

    fn violation(&mut self, row: u64, message: String) {
        self.report.violation_count += 1;
        if self.report.violations.len() < self.rules.max_violations {
            self.report.violations.push(Violation { row, message });
        }
    }

    fn check(&mut self, row: &ReadRow) {
        let (n, r) = (row.row, &row.record);

        self.report.records += 1;
        self.report.events[r.event.index()] += 1;
        if let Some(d) = r.drone {
            self.report.drones.insert(d);
        }
        if r.zone > self.report.max_zone {
            self.report.max_zone = r.zone;
        }

        if row.mission_time != r.timestamp {
            self.violation(n, format!("mission_time {} != timestamp {}", row.mission_time, r.timestamp));
        }
        if let (Some(area), Some(_)) = (&self.rules.area, r.zone) {
            if !area.contains(r.position) {
                self.violation(n, format!("zone position {} outside survey area", r.position));
            }
        }

        match r.event {
            EventType::ZoneDiscovered => self.check_discovered(n, r),
            EventType::ZoneClaimed    => self.check_claimed(n, r),
            EventType::ZoneProcessed  => self.check_processed(n, r),
            EventType::DroneDisabled  => self.check_disabled(n, r),
        }
    }

    fn expect_state(&mut self, n: u64, r: &TelemetryRecord, expected: DroneState) {
        if r.state != expected {
            self.violation(n, format!("{} with state {}, expected {}", r.event, r.state, expected));
        }
    }

    fn check_discovered(&mut self, n: u64, r: &TelemetryRecord) {
        self.expect_state(n, r, DroneState::Scout);
        if r.drone.is_some() {
            self.violation(n, "zone_discovered carries a drone".into());
        }
        if r.battery != 100.0 {
            self.violation(n, format!("scout battery {} != 100", r.battery));
        }
        self.chain = match r.zone {
            Some(zone) => Some(OpenChain::Discovered { zone }),
            None => {
                self.violation(n, "zone_discovered without zone_id".into());
                None
            }
        };
    }

    fn check_claimed(&mut self, n: u64, r: &TelemetryRecord) {
        self.expect_state(n, r, DroneState::Claiming);
        if !(40.0..=100.0).contains(&r.battery) {
            self.violation(n, format!("claim battery {} outside [40, 100]", r.battery));
        }
        if r.drone.is_none() {
            self.violation(n, "zone_claimed without drone".into());
        }
        match (self.chain, r.zone) {
            (Some(OpenChain::Discovered { zone }), Some(z)) if zone == z => {}
            _ => self.violation(n, "zone_claimed without a preceding zone_discovered for its zone".into()),
        }
        self.chain = r.zone.map(|zone| OpenChain::Claimed { zone, drone: r.drone, battery: r.battery });
    }

    fn check_processed(&mut self, n: u64, r: &TelemetryRecord) {
        self.expect_state(n, r, r.mode.processed_state());
        match (self.chain, r.zone) {
            (Some(OpenChain::Claimed { zone, drone, battery }), Some(z)) if zone == z => {
                if drone != r.drone {
                    self.violation(n, "zone_processed by a different drone than the claim".into());
                }
                if r.battery >= battery {
                    self.violation(n, format!("processed battery {} not below claim {}", r.battery, battery));
                }
            }
            _ => self.violation(n, "zone_processed without a preceding zone_claimed for its zone".into()),
        }
        self.chain = Some(OpenChain::Processed);
    }

    fn check_disabled(&mut self, n: u64, r: &TelemetryRecord) {
        self.expect_state(n, r, DroneState::Disabled);
        if r.zone.is_some() {
            self.violation(n, "drone_disabled scoped to a zone".into());
        }
        if !(0.0..=30.0).contains(&r.battery) {
            self.violation(n, format!("failure battery {} outside [0, 30]", r.battery));
        }
        self.chain = None;
    }

    fn finish(mut self) -> AuditReport {
        if let Some(expected) = self.rules.expected_records {
            if self.report.records != expected {
                let found = self.report.records;
                self.violation(0, format!("expected {expected} records, found {found}"));
            }
        }
        self.report
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Audit a telemetry stream from any `Read` source.
pub fn audit_reader<R: Read>(inner: R, rules: &AuditRules) -> OutputResult<AuditReport> {
    let mut auditor = Auditor::new(rules);
    for row in RecordReader::from_reader(inner)? {
        auditor.check(&row?);
    }
    Ok(auditor.finish())
}

/// Audit the telemetry file at `path`.
pub fn audit_path(path: &Path, rules: &AuditRules) -> OutputResult<AuditReport> {
    audit_reader(std::fs::File::open(path)?, rules)
}
