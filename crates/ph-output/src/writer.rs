//! The `EventWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, SummaryRow};

/// Sink for the rows an [`EventLog`](crate::EventLog) produces.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`EventLog::take_error`](crate::EventLog::take_error).
pub trait EventWriter: Send {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write the per-philosopher totals.
    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
