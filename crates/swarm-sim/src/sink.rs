//! The `RecordSink` trait: where emitted records go.

use std::convert::Infallible;

use swarm_core::TelemetryRecord;

/// Destination for the record stream.
///
/// The driver hands records over one at a time, in emission order, and
/// calls [`finish`](Self::finish) once after the last one.  Any error aborts
/// the run.  Implementations should buffer and flush incrementally; the
/// stream is never held in memory by the driver.
pub trait RecordSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Accept one record.
    fn write_record(&mut self, record: &TelemetryRecord) -> Result<(), Self::Error>;

    /// Flush and close.  Idempotent.
    fn finish(&mut self) -> Result<(), Self::Error>;
}

/// A sink that keeps every record in memory.
///
/// Intended for tests and small targets only.
#[derive(Debug, Default)]
pub struct VecSink {
    pub records:  Vec<TelemetryRecord>,
    pub finished: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for VecSink {
    type Error = Infallible;

    fn write_record(&mut self, record: &TelemetryRecord) -> Result<(), Infallible> {
        self.records.push(*record);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Infallible> {
        self.finished = true;
        Ok(())
    }
}
