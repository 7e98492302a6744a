//! CSV output backend.
//!
//! Writes the header row on creation and one row per record after that.
//! `csv::Writer` buffers internally, so memory stays flat regardless of the
//! target record count.
//!
//! [`CsvFile`] stages the stream in a temporary file beside its destination.
//! The destination only appears once [`CsvFile::commit`] succeeds, so an
//! aborted run never leaves a shorter file that parses cleanly.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use tempfile::NamedTempFile;

use swarm_core::TelemetryRecord;
use swarm_sim::RecordSink;

use crate::row::{CsvRow, HEADER};
use crate::{OutputError, OutputResult};

/// Streams telemetry records to a CSV file (or any `io::Write`).
pub struct CsvSink<W: Write> {
    writer:   Writer<W>,
    rows:     u64,
    finished: bool,
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer and write the header row.
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        Self::with_writer(WriterBuilder::new().has_headers(false).from_writer(inner))
    }

    fn with_writer(mut writer: Writer<W>) -> OutputResult<Self> {
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0, finished: false })
    }

    /// Data rows written so far (header excluded).
    #[inline]
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Write one record as a CSV row.
    pub fn write(&mut self, record: &TelemetryRecord) -> OutputResult<()> {
        self.writer.serialize(CsvRow::from_record(record))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows.  Idempotent.
    pub fn close(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.close()?;
        self.writer.into_inner().map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    type Error = OutputError;

    fn write_record(&mut self, record: &TelemetryRecord) -> OutputResult<()> {
        self.write(record)
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.close()
    }
}

// ── Staged file ───────────────────────────────────────────────────────────────

/// A telemetry CSV written to a temporary file in the destination's
/// directory and moved into place by [`commit`](Self::commit).
///
/// Dropping an uncommitted `CsvFile` deletes the staged data and leaves any
/// existing file at the destination untouched.
pub struct CsvFile {
    sink: CsvSink<NamedTempFile>,
    path: PathBuf,
}

impl CsvFile {
    /// Stage a new file for `path`.  The parent directory must exist.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir)?;
        Ok(Self { sink: CsvSink::from_writer(staged)?, path: path.to_path_buf() })
    }

    /// Flush and atomically rename the staged file to the destination,
    /// replacing any existing file.  Returns the number of data rows.
    pub fn commit(self) -> OutputResult<u64> {
        let rows = self.sink.rows();
        let staged = self.sink.into_inner()?;
        staged.persist(&self.path).map_err(|e| OutputError::Io(e.error))?;
        Ok(rows)
    }
}

impl RecordSink for CsvFile {
    type Error = OutputError;

    fn write_record(&mut self, record: &TelemetryRecord) -> OutputResult<()> {
        self.sink.write(record)
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.sink.close()
    }
}
