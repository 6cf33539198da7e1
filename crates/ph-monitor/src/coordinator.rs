//! The contract the philosopher loop programs against.

use ph_core::AgentId;

use crate::{MonitorResult, MonitorSnapshot};

/// Outcome of a successful [`Coordinator::acquire_resources`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Admission {
    /// The agent had to block before it was admitted.
    pub waited: bool,
}

/// Outcome of a successful [`Coordinator::request_floor`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FloorGrant {
    /// The floor was handed over (or, for the basic coordinator, a finishing
    /// speaker's signal was consumed).
    Granted,
    /// The basic coordinator's wait ran out.  The caller may talk anyway;
    /// nothing stops two speakers from overlapping in that case.
    TimedOut,
}

/// Shared-resource coordinator for a ring of philosophers.
///
/// Every method takes the calling agent's seat.  Blocking methods suspend the
/// caller without holding the coordinator lock and return
/// [`MonitorError::Cancelled`](crate::MonitorError::Cancelled) if
/// [`cancel`](Self::cancel) is called for that agent.
pub trait Coordinator: Send + Sync {
    fn agent_count(&self) -> usize;

    /// Become hungry and block until both chopsticks are granted.
    fn acquire_resources(&self, agent: AgentId) -> MonitorResult<Admission>;

    /// Put both chopsticks down.  Fails unless `agent` is eating.
    fn release_resources(&self, agent: AgentId) -> MonitorResult<()>;

    /// Block until `agent` may talk.
    fn request_floor(&self, agent: AgentId) -> MonitorResult<FloorGrant>;

    /// Give the floor back.
    fn release_floor(&self, agent: AgentId) -> MonitorResult<()>;

    /// Ask `agent`'s current (or next) suspension to give up.
    ///
    /// The request is sticky: if `agent` is not blocked right now, its next
    /// blocking call returns `Cancelled` instead of waiting.  A grant that has
    /// already happened is not undone.
    fn cancel(&self, agent: AgentId) -> MonitorResult<()>;

    /// Withdraw a pending cancellation that has not been delivered yet.
    fn clear_cancel(&self, agent: AgentId) -> MonitorResult<()>;

    fn cancel_all(&self) -> MonitorResult<()> {
        for seat in 0..self.agent_count() as u32 {
            self.cancel(AgentId(seat))?;
        }
        Ok(())
    }

    /// Withdraw every pending cancellation.
    fn clear_all_cancels(&self) -> MonitorResult<()> {
        for seat in 0..self.agent_count() as u32 {
            self.clear_cancel(AgentId(seat))?;
        }
        Ok(())
    }

    /// Consistent copy of all shared tables.
    fn snapshot(&self) -> MonitorResult<MonitorSnapshot>;

    /// The sleep gate, for coordinators that have one.
    fn sleep_gate(&self) -> Option<&dyn SleepGate> {
        None
    }
}

/// Sleeping philosophers veto the floor; nobody falls asleep mid-speech.
pub trait SleepGate: Send + Sync {
    /// Block while someone holds the floor, then fall asleep.
    ///
    /// Legal from thinking or eating; an eating agent puts its chopsticks
    /// down as it falls asleep.
    fn request_sleep(&self, agent: AgentId) -> MonitorResult<()>;

    /// Wake up (back to thinking) and let blocked floor requests re-check.
    fn end_sleep(&self, agent: AgentId) -> MonitorResult<()>;
}
