//! `TracingNarrator`: tells the story of the dinner through `tracing`.

use ph_core::AgentId;
use ph_monitor::{Admission, FloorGrant, MonitorSnapshot, Op};
use tracing::{debug, info, warn};

use crate::{TableObserver, TableReport};

/// Narrates every lifecycle event.  Meals, talks and naps go out at `info`,
/// the in-between steps at `debug`.
///
/// Seats are numbered from 1 in the narration.
#[derive(Default)]
pub struct TracingNarrator;

fn seat(agent: AgentId) -> u32 {
    agent.0 + 1
}

impl TableObserver for TracingNarrator {
    fn on_start(&self, snapshot: &MonitorSnapshot) {
        info!(philosophers = snapshot.states.len(), "the table is set");
        if let Some(ranks) = &snapshot.ranks {
            for (i, rank) in ranks.iter().enumerate() {
                info!(philosopher = i + 1, rank, "eating priority");
            }
        }
    }

    fn on_hungry(&self, agent: AgentId) {
        debug!(philosopher = seat(agent), "hungry, reaching for chopsticks");
    }

    fn on_eating(&self, agent: AgentId, admission: Admission) {
        info!(philosopher = seat(agent), waited = admission.waited, "eating");
    }

    fn on_done_eating(&self, agent: AgentId) {
        debug!(philosopher = seat(agent), "put down chopsticks");
    }

    fn on_thinking(&self, agent: AgentId) {
        debug!(philosopher = seat(agent), "thinking");
    }

    fn on_nothing_to_say(&self, agent: AgentId) {
        debug!(philosopher = seat(agent), "had nothing interesting to say");
    }

    fn on_talking(&self, agent: AgentId, grant: FloorGrant, phrase: &str) {
        match grant {
            FloorGrant::Granted  => info!(philosopher = seat(agent), "says: {phrase}"),
            FloorGrant::TimedOut => info!(philosopher = seat(agent), timed_out = true, "says: {phrase}"),
        }
    }

    fn on_done_talking(&self, agent: AgentId) {
        debug!(philosopher = seat(agent), "others are free to speak");
    }

    fn on_sleeping(&self, agent: AgentId) {
        info!(philosopher = seat(agent), "sleeping");
    }

    fn on_awake(&self, agent: AgentId) {
        debug!(philosopher = seat(agent), "woke up");
    }

    fn on_cancelled(&self, agent: AgentId, op: Op) {
        warn!(philosopher = seat(agent), %op, "left the table");
    }

    fn on_finished(&self, report: &TableReport) {
        info!(
            meals = report.total_meals(),
            talks = report.total_talks(),
            naps = report.total_naps(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            stopped_early = report.stopped_early(),
            "dinner is over"
        );
    }
}
