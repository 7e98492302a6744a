//! Integration tests for swarm-output.

use swarm_core::{DroneId, DroneState, EventType, Mode, Point, RunConfig, TelemetryRecord, ZoneId};

fn discovered(zone: u64, ts: f64) -> TelemetryRecord {
    TelemetryRecord {
        timestamp: ts,
        event:     EventType::ZoneDiscovered,
        drone:     None,
        zone:      Some(ZoneId(zone)),
        position:  Point::new(512.25, 300.5),
        battery:   100.0,
        state:     DroneState::Scout,
        mode:      Mode::Weeds,
    }
}

fn test_config(target: u64) -> RunConfig {
    RunConfig { target_records: target, zones_per_batch: 50, seed: 7, ..RunConfig::default() }
}

const HEADER_LINE: &str = "timestamp,event_type,drone_id,zone_id,x,y,battery,state,mode,mission_time";

// ── Writer ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use swarm_sim::RecordSink;

    use super::*;
    use crate::{CsvFile, CsvSink};

    fn render(records: &[TelemetryRecord]) -> String {
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        for r in records {
            sink.write(r).unwrap();
        }
        assert_eq!(sink.rows(), records.len() as u64);
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn empty_file_is_just_the_header() {
        assert_eq!(render(&[]), format!("{HEADER_LINE}\n"));
    }

    #[test]
    fn discovery_row_uses_sentinel_drone() {
        let out = render(&[discovered(3, 12.5)]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], HEADER_LINE);
        assert_eq!(lines[1], "12.5,zone_discovered,-1,3,512.25,300.5,100.0,SCOUT,0,12.5");
    }

    #[test]
    fn disabled_row_uses_sentinel_zone() {
        let r = TelemetryRecord {
            timestamp: 0.042,
            event:     EventType::DroneDisabled,
            drone:     Some(DroneId(9)),
            zone:      None,
            position:  Point::new(800.0, 650.0),
            battery:   17.3,
            state:     DroneState::Disabled,
            mode:      Mode::Irrigation,
        };
        let out = render(&[r]);
        assert_eq!(out.lines().nth(1).unwrap(), "0.042,drone_disabled,9,-1,800.0,650.0,17.3,DISABLED,1,0.042");
    }

    #[test]
    fn coordinates_never_use_exponent_form() {
        let mut r = discovered(1, 2.0);
        r.position = Point::new(1e-7, 2e16);
        let out = render(&[r]);
        assert_eq!(out.lines().nth(1).unwrap(), "2.0,zone_discovered,-1,1,0.0000001,20000000000000000.0,100.0,SCOUT,0,2.0");

        let back: Vec<_> = crate::RecordReader::from_reader(out.as_bytes()).unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(back[0].record.position, r.position);
    }

    #[test]
    fn close_is_idempotent() {
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        sink.write(&discovered(0, 1.0)).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert_eq!(sink.rows(), 1);
    }

    #[test]
    fn committed_file_appears_at_destination() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("telemetry.csv");
        let mut file = CsvFile::create(&path).unwrap();
        file.write_record(&discovered(0, 1.0)).unwrap();
        assert!(!path.exists());

        assert_eq!(file.commit().unwrap(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(HEADER_LINE));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn uncommitted_file_leaves_nothing_behind() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("telemetry.csv");
        let mut file = CsvFile::create(&path).unwrap();
        file.write_record(&discovered(0, 1.0)).unwrap();
        file.finish().unwrap();
        drop(file);

        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

// ── Reader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reader_tests {
    use super::*;
    use crate::{CsvSink, OutputError, RecordReader};

    #[test]
    fn written_records_read_back_equal() {
        let records = vec![discovered(0, 1.25), discovered(1, 299.999)];
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        for r in &records {
            sink.write(r).unwrap();
        }
        let bytes = sink.into_inner().unwrap();

        let back: Vec<_> = RecordReader::from_reader(bytes.as_slice())
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].row, 1);
        assert_eq!(back[1].record, records[1]);
        assert_eq!(back[1].mission_time, 299.999);
    }

    #[test]
    fn wrong_header_is_rejected() {
        let data = "ts,event,drone,zone,x,y,battery,state,mode,mission_time\n";
        let err = RecordReader::from_reader(data.as_bytes()).err().unwrap();
        assert!(matches!(err, OutputError::Header { .. }));
    }

    #[test]
    fn unknown_event_is_a_schema_error() {
        let data = format!("{HEADER_LINE}\n1.0,zone_exploded,-1,0,1.0,1.0,100.0,SCOUT,0,1.0\n");
        let mut reader = RecordReader::from_reader(data.as_bytes()).unwrap();
        match reader.next() {
            Some(Err(OutputError::Schema { row, message })) => {
                assert_eq!(row, 1);
                assert!(message.contains("zone_exploded"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn read_records_from_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("t.csv");
        std::fs::write(&path, format!("{HEADER_LINE}\n2.0,zone_discovered,-1,4,1.0,2.0,100.0,SCOUT,1,2.0\n")).unwrap();

        let records = crate::read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].zone, Some(ZoneId(4)));
        assert_eq!(records[0].mode, Mode::Irrigation);
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline_tests {
    use swarm_sim::{GeneratorBuilder, NoopObserver, RecordSink};
    use swarm_spatial::SurveyArea;

    use super::*;
    use crate::{AuditRules, CsvFile, CsvSink, OutputError, audit_path, audit_reader};

    fn generate_bytes(config: RunConfig) -> Vec<u8> {
        let mut generator = GeneratorBuilder::new(config).build().unwrap();
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        generator.run(&mut sink, &mut NoopObserver).unwrap();
        sink.into_inner().unwrap()
    }

    #[test]
    fn same_seed_gives_identical_bytes() {
        assert_eq!(generate_bytes(test_config(3_000)), generate_bytes(test_config(3_000)));
    }

    #[test]
    fn generated_file_passes_audit() {
        let config = test_config(10_000);
        let rules = AuditRules {
            area: Some(SurveyArea::new(config.polygon.clone()).unwrap()),
            expected_records: Some(10_000),
            ..AuditRules::default()
        };

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("telemetry.csv");
        let mut generator = GeneratorBuilder::new(config).build().unwrap();
        let mut file = CsvFile::create(&path).unwrap();
        let summary = generator.run(&mut file, &mut NoopObserver).unwrap();
        file.commit().unwrap();

        let report = audit_path(&path, &rules).unwrap();
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.records, 10_000);
        for event in EventType::ALL {
            assert_eq!(report.count(event), summary.count(event));
        }
        assert!(report.drones.len() <= 10);
    }

    /// Passes records through to a `CsvFile` until `limit`, then fails.
    struct FailsAfter<'a> {
        file:  &'a mut CsvFile,
        limit: usize,
    }

    impl RecordSink for FailsAfter<'_> {
        type Error = OutputError;

        fn write_record(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
            if self.limit == 0 {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.limit -= 1;
            self.file.write_record(record)
        }

        fn finish(&mut self) -> Result<(), OutputError> {
            self.file.finish()
        }
    }

    #[test]
    fn aborted_run_keeps_previous_output() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("telemetry.csv");
        std::fs::write(&path, "previous run\n").unwrap();

        let mut generator = GeneratorBuilder::new(test_config(5_000)).build().unwrap();
        let mut file = CsvFile::create(&path).unwrap();
        let result = generator.run(&mut FailsAfter { file: &mut file, limit: 1_000 }, &mut NoopObserver);
        assert!(result.is_err());
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous run\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn audit_flags_wrong_record_count() {
        let bytes = generate_bytes(test_config(100));
        let rules = AuditRules { expected_records: Some(99), ..AuditRules::default() };
        let report = audit_reader(bytes.as_slice(), &rules).unwrap();
        assert_eq!(report.violation_count, 1);
        assert_eq!(report.violations[0].row, 0);
    }
}

// ── Audit rules ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod audit_tests {
    use super::*;
    use crate::{AuditRules, audit_reader};

    fn audit(rows: &[&str]) -> crate::AuditReport {
        let data = format!("{HEADER_LINE}\n{}\n", rows.join("\n"));
        audit_reader(data.as_bytes(), &AuditRules::default()).unwrap()
    }

    #[test]
    fn well_formed_chain_is_clean() {
        let report = audit(&[
            "10.0,zone_discovered,-1,0,5.0,5.0,100.0,SCOUT,0,10.0",
            "20.0,zone_claimed,2,0,5.0,5.0,80.0,CLAIMING,0,20.0",
            "25.0,zone_processed,2,0,5.0,5.0,70.5,WORKED,0,25.0",
            "5.0,drone_disabled,4,-1,800.0,650.0,12.0,DISABLED,0,5.0",
        ]);
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.count(EventType::ZoneProcessed), 1);
        assert_eq!(report.drones.len(), 2);
        assert_eq!(report.max_zone, Some(ZoneId(0)));
    }

    #[test]
    fn orphan_processed_is_flagged() {
        let report = audit(&[
            "10.0,zone_discovered,-1,0,5.0,5.0,100.0,SCOUT,0,10.0",
            "25.0,zone_processed,2,0,5.0,5.0,70.5,WORKED,0,25.0",
        ]);
        assert_eq!(report.violation_count, 1);
        assert_eq!(report.violations[0].row, 2);
    }

    #[test]
    fn battery_must_drop_when_processing() {
        let report = audit(&[
            "10.0,zone_discovered,-1,0,5.0,5.0,100.0,SCOUT,1,10.0",
            "20.0,zone_claimed,2,0,5.0,5.0,60.0,CLAIMING,1,20.0",
            "25.0,zone_processed,2,0,5.0,5.0,60.0,PAINTED,1,25.0",
        ]);
        assert_eq!(report.violation_count, 1);
        assert!(report.violations[0].message.contains("not below"));
    }

    #[test]
    fn processed_label_follows_mode() {
        let report = audit(&[
            "10.0,zone_discovered,-1,0,5.0,5.0,100.0,SCOUT,1,10.0",
            "20.0,zone_claimed,2,0,5.0,5.0,60.0,CLAIMING,1,20.0",
            "25.0,zone_processed,2,0,5.0,5.0,50.0,WORKED,1,25.0",
        ]);
        assert_eq!(report.violation_count, 1);
        assert!(report.violations[0].message.contains("PAINTED"));
    }

    #[test]
    fn mission_time_mismatch_and_bad_failure_battery() {
        let report = audit(&["5.0,drone_disabled,4,-1,800.0,650.0,42.0,DISABLED,0,6.0"]);
        assert_eq!(report.violation_count, 2);
    }

    #[test]
    fn violations_list_is_capped() {
        let rows = vec!["25.0,zone_processed,2,0,5.0,5.0,70.5,WORKED,0,25.0"; 5];
        let data = format!("{HEADER_LINE}\n{}\n", rows.join("\n"));
        let rules = AuditRules { max_violations: 2, ..AuditRules::default() };
        let report = audit_reader(data.as_bytes(), &rules).unwrap();
        assert_eq!(report.violation_count, 5);
        assert_eq!(report.violations.len(), 2);
    }
}
