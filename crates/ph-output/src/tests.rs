//! Tests for ph-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{EventRow, SummaryRow};
    use crate::writer::EventWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir.path().join("events.csv")), ["seq", "agent", "event", "detail"]);
        assert_eq!(
            headers(&dir.path().join("summary.csv")),
            ["agent", "meals", "waited_meals", "talks", "timed_out_talks", "naps", "stopped_early"]
        );
    }

    #[test]
    fn phrases_with_commas_survive_quoting() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let phrase = "Eh, it's not easy to be a philosopher: eat, think, talk, eat...";
        w.write_event(&EventRow { seq: 0, agent: 3, event: "talking", detail: phrase.to_owned() })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "3");
        assert_eq!(&rows[0][2], "talking");
        assert_eq!(&rows[0][3], phrase);
    }

    #[test]
    fn summary_flags_written_as_digits() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = SummaryRow {
            agent:           1,
            meals:           4,
            waited_meals:    2,
            talks:           1,
            timed_out_talks: 0,
            naps:            3,
            stopped_early:   true,
        };
        w.write_summary(&[row]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "4");
        assert_eq!(&rows[0][5], "3");
        assert_eq!(&rows[0][6], "1");
    }
}

#[cfg(test)]
mod observer_tests {
    use ph_core::{AgentId, TableConfig, Variant};
    use ph_monitor::{Admission, FloorGrant, Op};
    use ph_table::{TableBuilder, TableObserver};

    use crate::row::{EventRow, SummaryRow};
    use crate::writer::EventWriter;
    use crate::{CsvWriter, EventLog, OutputError, OutputResult};

    /// Keeps rows in memory; can be told to fail.
    #[derive(Default)]
    struct MemoryWriter {
        events:   Vec<EventRow>,
        summary:  Vec<SummaryRow>,
        finished: u32,
        fail:     bool,
    }

    impl EventWriter for MemoryWriter {
        fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.events.push(row.clone());
            Ok(())
        }

        fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
            self.summary.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn events_are_numbered_in_arrival_order() {
        let log = EventLog::new(MemoryWriter::default());
        log.on_hungry(AgentId(1));
        log.on_eating(AgentId(1), Admission { waited: true });
        log.on_talking(AgentId(1), FloorGrant::TimedOut, "hello");
        log.on_cancelled(AgentId(2), Op::RequestFloor);

        assert_eq!(log.events_logged(), 4);
        let w = log.into_writer().unwrap();
        let seqs: Vec<u64> = w.events.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, [0, 1, 2, 3]);
        assert_eq!(w.events[1].detail, "waited");
        assert_eq!(w.events[2].event, "talking_after_timeout");
        assert_eq!(w.events[2].detail, "hello");
        assert_eq!(w.events[3].detail, "request_floor");
    }

    #[test]
    fn first_write_error_is_kept() {
        let log = EventLog::new(MemoryWriter { fail: true, ..Default::default() });
        log.on_hungry(AgentId(0));
        log.on_thinking(AgentId(0));
        assert!(matches!(log.take_error(), Some(OutputError::Io(_))));
        assert!(log.take_error().is_none());
    }

    #[test]
    fn whole_dinner_is_logged() {
        let config = TableConfig {
            philosophers:     3,
            dining_steps:     4,
            time_to_waste_ms: 1,
            variant:          Variant::Advanced,
            ..TableConfig::default()
        };
        let table = TableBuilder::new(config).build().unwrap();
        let log = EventLog::new(MemoryWriter::default());
        let report = table.run(&log).unwrap();
        assert!(log.take_error().is_none());

        let w = log.into_writer().unwrap();
        assert_eq!(w.finished, 1);
        assert_eq!(w.summary.len(), 3);
        assert!(w.summary.iter().all(|r| r.meals == 4));

        let seated: Vec<&EventRow> = w.events.iter().filter(|r| r.event == "seated").collect();
        assert_eq!(seated.len(), 3);
        assert!(seated.iter().all(|r| r.detail.starts_with("rank=")));

        let meals = w.events.iter().filter(|r| r.event == "eating").count() as u64;
        assert_eq!(meals, report.total_meals());
    }

    #[test]
    fn basic_dinner_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = TableConfig {
            philosophers:     2,
            dining_steps:     3,
            time_to_waste_ms: 1,
            variant:          Variant::Basic,
            ..TableConfig::default()
        };
        let table = TableBuilder::new(config).build().unwrap();
        let log = EventLog::new(CsvWriter::new(dir.path()).unwrap());
        table.run(&log).unwrap();
        assert!(log.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert!(rows.iter().any(|r| &r[2] == "eating"));
        assert!(rows.iter().filter(|r| &r[2] == "seated").all(|r| r[3].is_empty()));

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }
}
