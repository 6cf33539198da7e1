//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult, SummaryRow};

/// Writes the dinner log to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["seq", "agent", "event", "detail"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "agent",
            "meals",
            "waited_meals",
            "talks",
            "timed_out_talks",
            "naps",
            "stopped_early",
        ])?;

        Ok(Self { events, summary, finished: false })
    }
}

impl EventWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record([
            row.seq.to_string().as_str(),
            row.agent.to_string().as_str(),
            row.event,
            row.detail.as_str(),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summary.write_record(&[
                row.agent.to_string(),
                row.meals.to_string(),
                row.waited_meals.to_string(),
                row.talks.to_string(),
                row.timed_out_talks.to_string(),
                row.naps.to_string(),
                (row.stopped_early as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
