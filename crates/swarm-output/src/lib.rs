//! `swarm-output` — the CSV side of the drone swarm generator.
//!
//! | Type            | Role                                                  |
//! |-----------------|-------------------------------------------------------|
//! | [`CsvSink`]     | `swarm_sim::RecordSink` writing the telemetry CSV     |
//! | [`CsvFile`]     | `CsvSink` staged in a temp file, published on commit  |
//! | [`RecordReader`]| streaming, header-checked reader for the same format  |
//! | [`audit_path`]  | re-checks a file against the generator's guarantees   |
//!
//! Columns, in order:
//! `timestamp,event_type,drone_id,zone_id,x,y,battery,state,mode,mission_time`.
//! Absent drone or zone IDs are written as `-1`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swarm_output::CsvFile;
//!
//! let mut file = CsvFile::create(Path::new("output/telemetry.csv"))?;
//! generator.run(&mut file, &mut NoopObserver)?;
//! file.commit()?;
//! ```

pub mod audit;
pub mod csv;
pub mod error;
pub mod reader;
pub mod row;

#[cfg(test)]
mod tests;

pub use audit::{AuditReport, AuditRules, Violation, audit_path, audit_reader};
pub use csv::{CsvFile, CsvSink};
pub use error::{OutputError, OutputResult};
pub use reader::{ReadRow, RecordReader, read_records};
pub use row::{CsvRow, HEADER};
