//! `DiningTable`: one thread per seat around a shared coordinator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

use ph_core::{AgentId, TableConfig};
use ph_monitor::Coordinator;
use tracing::{error, warn};

use crate::{
    Philosopher, PhilosopherTally, TableError, TableObserver, TableReport, TableResult,
};

/// A configured dinner, ready to run.
///
/// Build one with [`TableBuilder`](crate::TableBuilder).  The table owns the
/// coordinator; [`run`](Self::run) borrows it for every seat thread.
pub struct DiningTable {
    config:      TableConfig,
    coordinator: Box<dyn Coordinator>,
}

impl DiningTable {
    pub(crate) fn new(config: TableConfig, coordinator: Box<dyn Coordinator>) -> Self {
        Self { config, coordinator }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &dyn Coordinator {
        &*self.coordinator
    }

    /// Seat every philosopher on its own scoped thread and wait for all of
    /// them to finish.
    ///
    /// With `max_run_ms` set, a watchdog thread raises the stop flag and
    /// cancels every pending wait once the limit passes.  The first
    /// philosopher to fail for any reason other than cancellation does the
    /// same, and its error is returned after the others have left.
    ///
    /// Pending cancellations are withdrawn before the seats start and again
    /// after they have all left, so a table stopped by its watchdog can be
    /// run again.
    pub fn run<O: TableObserver>(&self, observer: &O) -> TableResult<TableReport> {
        let coordinator: &dyn Coordinator = &*self.coordinator;
        let observer: &dyn TableObserver = observer;
        let config = &self.config;
        let stop = &AtomicBool::new(false);

        coordinator.clear_all_cancels()?;
        observer.on_start(&coordinator.snapshot()?);
        let started = Instant::now();

        let outcomes: Vec<TableResult<PhilosopherTally>> = thread::scope(|s| {
            // Every seat holds a sender; the channel disconnects once all
            // seats are gone.
            let (done_tx, done_rx) = mpsc::channel::<()>();

            let seats: Vec<_> = (0..coordinator.agent_count() as u32)
                .map(|i| {
                    let agent = AgentId(i);
                    let guard = SeatGuard { agent, coordinator, stop, _done: done_tx.clone() };
                    s.spawn(move || {
                        let _guard = guard;
                        let result = Philosopher::new(agent, coordinator, observer, config, stop).run();
                        if let Err(e) = &result {
                            error!(%agent, error = %e, "philosopher failed, stopping the table");
                            halt(coordinator, stop);
                        }
                        result
                    })
                })
                .collect();
            drop(done_tx);

            if let Some(limit) = config.max_run() {
                s.spawn(move || {
                    if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(limit) {
                        warn!(limit_ms = limit.as_millis() as u64, "dinner ran too long, cancelling");
                        halt(coordinator, stop);
                    }
                });
            }

            seats
                .into_iter()
                .enumerate()
                .map(|(i, seat)| {
                    seat.join()
                        .unwrap_or_else(|_| Err(TableError::Panicked(AgentId(i as u32))))
                })
                .collect()
        });

        // A halt can leave requests pending for seats that had already
        // left; they must not leak into the next run.
        coordinator.clear_all_cancels()?;

        let mut tallies = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            tallies.push(outcome?);
        }

        let report = TableReport {
            variant: config.variant,
            tallies,
            elapsed: started.elapsed(),
        };
        observer.on_finished(&report);
        Ok(report)
    }
}

/// Raise the stop flag and wake every blocked philosopher.
fn halt(coordinator: &dyn Coordinator, stop: &AtomicBool) {
    stop.store(true, Ordering::Release);
    if let Err(e) = coordinator.cancel_all() {
        error!(error = %e, "could not cancel the remaining philosophers");
    }
}

/// Held by each seat thread for its whole life.  Dropping it releases the
/// watchdog's sender; dropping it while unwinding stops the table.
struct SeatGuard<'a> {
    agent:       AgentId,
    coordinator: &'a dyn Coordinator,
    stop:        &'a AtomicBool,
    _done:       Sender<()>,
}

impl Drop for SeatGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            error!(agent = %self.agent, "philosopher panicked, stopping the table");
            halt(self.coordinator, self.stop);
        }
    }
}
