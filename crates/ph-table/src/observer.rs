//! Narration hooks for the philosopher loop.

use ph_core::AgentId;
use ph_monitor::{Admission, FloorGrant, MonitorSnapshot, Op};

use crate::TableReport;

/// Callbacks invoked by the philosopher threads as they move through their
/// cycle.
///
/// Hooks run on the philosopher's own thread and never inside the
/// coordinator's critical section, so an observer may block on I/O without
/// holding up admission decisions.  Implementors must be `Sync` because every
/// philosopher shares the same observer.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait TableObserver: Sync {
    /// Called once before any philosopher starts, with the initial tables.
    fn on_start(&self, _snapshot: &MonitorSnapshot) {}

    fn on_hungry(&self, _agent: AgentId) {}

    fn on_eating(&self, _agent: AgentId, _admission: Admission) {}

    fn on_done_eating(&self, _agent: AgentId) {}

    fn on_thinking(&self, _agent: AgentId) {}

    /// The philosopher decided not to talk this cycle.
    fn on_nothing_to_say(&self, _agent: AgentId) {}

    fn on_talking(&self, _agent: AgentId, _grant: FloorGrant, _phrase: &str) {}

    fn on_done_talking(&self, _agent: AgentId) {}

    fn on_sleeping(&self, _agent: AgentId) {}

    fn on_awake(&self, _agent: AgentId) {}

    /// A blocking call was cancelled; the philosopher leaves the table.
    fn on_cancelled(&self, _agent: AgentId, _op: Op) {}

    /// Called once after every philosopher thread has finished.
    fn on_finished(&self, _report: &TableReport) {}
}

/// A [`TableObserver`] that does nothing.
pub struct NoopObserver;

impl TableObserver for NoopObserver {}

impl<T: TableObserver + ?Sized> TableObserver for &T {
    fn on_start(&self, snapshot: &MonitorSnapshot) {
        (**self).on_start(snapshot)
    }

    fn on_hungry(&self, agent: AgentId) {
        (**self).on_hungry(agent)
    }

    fn on_eating(&self, agent: AgentId, admission: Admission) {
        (**self).on_eating(agent, admission)
    }

    fn on_done_eating(&self, agent: AgentId) {
        (**self).on_done_eating(agent)
    }

    fn on_thinking(&self, agent: AgentId) {
        (**self).on_thinking(agent)
    }

    fn on_nothing_to_say(&self, agent: AgentId) {
        (**self).on_nothing_to_say(agent)
    }

    fn on_talking(&self, agent: AgentId, grant: FloorGrant, phrase: &str) {
        (**self).on_talking(agent, grant, phrase)
    }

    fn on_done_talking(&self, agent: AgentId) {
        (**self).on_done_talking(agent)
    }

    fn on_sleeping(&self, agent: AgentId) {
        (**self).on_sleeping(agent)
    }

    fn on_awake(&self, agent: AgentId) {
        (**self).on_awake(agent)
    }

    fn on_cancelled(&self, agent: AgentId, op: Op) {
        (**self).on_cancelled(agent, op)
    }

    fn on_finished(&self, report: &TableReport) {
        (**self).on_finished(report)
    }
}

/// Two observers in sequence: every event goes to `.0`, then to `.1`.
impl<A: TableObserver, B: TableObserver> TableObserver for (A, B) {
    fn on_start(&self, snapshot: &MonitorSnapshot) {
        self.0.on_start(snapshot);
        self.1.on_start(snapshot);
    }

    fn on_hungry(&self, agent: AgentId) {
        self.0.on_hungry(agent);
        self.1.on_hungry(agent);
    }

    fn on_eating(&self, agent: AgentId, admission: Admission) {
        self.0.on_eating(agent, admission);
        self.1.on_eating(agent, admission);
    }

    fn on_done_eating(&self, agent: AgentId) {
        self.0.on_done_eating(agent);
        self.1.on_done_eating(agent);
    }

    fn on_thinking(&self, agent: AgentId) {
        self.0.on_thinking(agent);
        self.1.on_thinking(agent);
    }

    fn on_nothing_to_say(&self, agent: AgentId) {
        self.0.on_nothing_to_say(agent);
        self.1.on_nothing_to_say(agent);
    }

    fn on_talking(&self, agent: AgentId, grant: FloorGrant, phrase: &str) {
        self.0.on_talking(agent, grant, phrase);
        self.1.on_talking(agent, grant, phrase);
    }

    fn on_done_talking(&self, agent: AgentId) {
        self.0.on_done_talking(agent);
        self.1.on_done_talking(agent);
    }

    fn on_sleeping(&self, agent: AgentId) {
        self.0.on_sleeping(agent);
        self.1.on_sleeping(agent);
    }

    fn on_awake(&self, agent: AgentId) {
        self.0.on_awake(agent);
        self.1.on_awake(agent);
    }

    fn on_cancelled(&self, agent: AgentId, op: Op) {
        self.0.on_cancelled(agent, op);
        self.1.on_cancelled(agent, op);
    }

    fn on_finished(&self, report: &TableReport) {
        self.0.on_finished(report);
        self.1.on_finished(report);
    }
}
