//! Streaming reader for telemetry CSV files.
//!
//! Rows are decoded into a reused `StringRecord`, so reading a million-row
//! file keeps one row in memory at a time.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use swarm_core::TelemetryRecord;

use crate::row::{CsvRow, HEADER};
use crate::{OutputError, OutputResult};

/// One decoded data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadRow {
    /// 1-based data row number (the header is row 0).
    pub row:          u64,
    pub record:       TelemetryRecord,
    /// The file's `mission_time` column, kept separately so it can be
    /// checked against `timestamp`.
    pub mission_time: f64,
}

/// Iterates the data rows of a telemetry CSV after checking its header.
pub struct RecordReader<R: Read> {
    reader:  Reader<R>,
    headers: StringRecord,
    buf:     StringRecord,
    row:     u64,
}

impl RecordReader<File> {
    pub fn open(path: &Path) -> OutputResult<Self> {
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> RecordReader<R> {
    /// Wrap any `Read` source.  Fails if the header row is not exactly the
    /// expected one.
    pub fn from_reader(inner: R) -> OutputResult<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(inner);
        let headers = reader.headers()?.clone();
        check_header(&headers)?;
        Ok(Self { reader, headers, buf: StringRecord::new(), row: 0 })
    }

    fn read_next(&mut self) -> OutputResult<Option<ReadRow>> {
        if !self.reader.read_record(&mut self.buf)? {
            return Ok(None);
        }
        self.row += 1;
        let row = self.row;

        let csv_row: CsvRow<'_> = self
            .buf
            .deserialize(Some(&self.headers))
            .map_err(|e| OutputError::Schema { row, message: e.to_string() })?;
        let record = csv_row
            .to_record()
            .map_err(|message| OutputError::Schema { row, message })?;

        Ok(Some(ReadRow { row, record, mission_time: csv_row.mission_time }))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = OutputResult<ReadRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Load every record of a file.  Convenient for tests and small files; use
/// [`RecordReader`] to stream large ones.
pub fn read_records(path: &Path) -> OutputResult<Vec<TelemetryRecord>> {
    RecordReader::open(path)?
        .map(|r| r.map(|row| row.record))
        .collect()
}

fn check_header(found: &StringRecord) -> OutputResult<()> {
    if found.iter().eq(HEADER.iter().copied()) {
        return Ok(());
    }
    Err(OutputError::Header {
        expected: HEADER.join(","),
        found:    found.iter().collect::<Vec<_>>().join(","),
    })
}
