//! `ph-output`: dinner logs for the dining table.
//!
//! | Backend | Files created                  |
//! |---------|--------------------------------|
//! | CSV     | `events.csv`, `summary.csv`    |
//!
//! Backends implement [`EventWriter`] and are driven by [`EventLog`], which
//! implements `ph_table::TableObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ph_output::{CsvWriter, EventLog};
//!
//! let log = EventLog::new(CsvWriter::new(Path::new("./output"))?);
//! table.run(&log)?;
//! log.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLog;
pub use row::{EventRow, SummaryRow};
pub use writer::EventWriter;
