//! `EventLog<W>`: bridges `TableObserver` to an `EventWriter`.

use std::sync::{Mutex, MutexGuard};

use ph_core::AgentId;
use ph_monitor::{Admission, FloorGrant, MonitorSnapshot, Op};
use ph_table::{TableObserver, TableReport};

use crate::row::{EventRow, SummaryRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

struct Inner<W> {
    writer:     W,
    next_seq:   u64,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> Inner<W> {
    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// A [`TableObserver`] that logs every lifecycle event to an
/// [`EventWriter`] backend and writes the per-philosopher summary when the
/// dinner ends.
///
/// Every philosopher thread shares the log, so the writer sits behind a
/// mutex.  Errors from the writer are stored internally because
/// `TableObserver` methods have no return value.  After `table.run()`
/// returns, check for errors with [`take_error`][Self::take_error].
pub struct EventLog<W: EventWriter> {
    inner: Mutex<Inner<W>>,
}

impl<W: EventWriter> EventLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(Inner { writer, next_seq: 0, last_error: None }),
        }
    }

    /// Take the stored write error (if any) after `table.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        match self.inner.lock() {
            Ok(mut inner) => inner.last_error.take(),
            Err(_)        => Some(OutputError::Poisoned),
        }
    }

    /// Number of events logged so far.
    pub fn events_logged(&self) -> u64 {
        self.inner.lock().map_or(0, |inner| inner.next_seq)
    }

    /// Unwrap the inner writer (e.g. to flush it after a failed run).
    pub fn into_writer(self) -> OutputResult<W> {
        self.inner
            .into_inner()
            .map(|inner| inner.writer)
            .map_err(|_| OutputError::Poisoned)
    }

    fn lock(&self) -> Option<MutexGuard<'_, Inner<W>>> {
        // A philosopher that panicked mid-write already stopped the table;
        // later events are dropped.
        self.inner.lock().ok()
    }

    fn log(&self, agent: AgentId, event: &'static str, detail: String) {
        let Some(mut inner) = self.lock() else { return };
        let row = EventRow { seq: inner.next_seq, agent: agent.0, event, detail };
        inner.next_seq += 1;
        let result = inner.writer.write_event(&row);
        inner.store_err(result);
    }
}

impl<W: EventWriter> TableObserver for EventLog<W> {
    fn on_start(&self, snapshot: &MonitorSnapshot) {
        for i in 0..snapshot.states.len() {
            let detail = match &snapshot.ranks {
                Some(ranks) => format!("rank={}", ranks[i]),
                None        => String::new(),
            };
            self.log(AgentId(i as u32), "seated", detail);
        }
    }

    fn on_hungry(&self, agent: AgentId) {
        self.log(agent, "hungry", String::new());
    }

    fn on_eating(&self, agent: AgentId, admission: Admission) {
        let detail = if admission.waited { "waited" } else { "" };
        self.log(agent, "eating", detail.to_owned());
    }

    fn on_done_eating(&self, agent: AgentId) {
        self.log(agent, "done_eating", String::new());
    }

    fn on_thinking(&self, agent: AgentId) {
        self.log(agent, "thinking", String::new());
    }

    fn on_nothing_to_say(&self, agent: AgentId) {
        self.log(agent, "nothing_to_say", String::new());
    }

    fn on_talking(&self, agent: AgentId, grant: FloorGrant, phrase: &str) {
        let event = match grant {
            FloorGrant::Granted  => "talking",
            FloorGrant::TimedOut => "talking_after_timeout",
        };
        self.log(agent, event, phrase.to_owned());
    }

    fn on_done_talking(&self, agent: AgentId) {
        self.log(agent, "done_talking", String::new());
    }

    fn on_sleeping(&self, agent: AgentId) {
        self.log(agent, "sleeping", String::new());
    }

    fn on_awake(&self, agent: AgentId) {
        self.log(agent, "awake", String::new());
    }

    fn on_cancelled(&self, agent: AgentId, op: Op) {
        self.log(agent, "cancelled", op.to_string());
    }

    fn on_finished(&self, report: &TableReport) {
        let rows: Vec<SummaryRow> = report
            .tallies
            .iter()
            .map(|t| SummaryRow {
                agent:           t.agent.0,
                meals:           t.meals,
                waited_meals:    t.waited_meals,
                talks:           t.talks,
                timed_out_talks: t.timed_out_talks,
                naps:            t.naps,
                stopped_early:   t.stopped_early,
            })
            .collect();

        let Some(mut inner) = self.lock() else { return };
        let result = inner.writer.write_summary(&rows);
        inner.store_err(result);
        let result = inner.writer.finish();
        inner.store_err(result);
    }
}
