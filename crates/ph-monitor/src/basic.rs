//! The basic coordinator: neighbour-state admission and a timed talk floor.

use std::sync::Condvar;
use std::time::{Duration, Instant};

use ph_core::{AgentId, State};
use tracing::debug;

use crate::coordinator::{Admission, Coordinator, FloorGrant};
use crate::seating::Seating;
use crate::{MonitorError, MonitorResult, MonitorSnapshot, Op};

/// Talk bookkeeping.  `signals` counts `end_talk` wake-ups not yet consumed
/// by a waiter, so a spurious condvar wake-up is never mistaken for one.
#[derive(Default)]
pub(crate) struct TalkQueue {
    waiters: usize,
    signals: usize,
}

/// Dijkstra-style monitor without priorities.
///
/// Talking is best-effort: [`request_talk`](Self::request_talk) waits for a
/// finishing speaker's signal for at most `talk_timeout` and then lets the
/// caller go either way.  There is no exclusion guarantee on the floor.
pub struct BasicMonitor {
    seating:      Seating<TalkQueue>,
    talk:         Condvar,
    talk_timeout: Duration,
}

impl BasicMonitor {
    pub fn new(count: usize, talk_timeout: Duration) -> MonitorResult<Self> {
        Ok(Self {
            seating: Seating::new(count, None, TalkQueue::default())?,
            talk: Condvar::new(),
            talk_timeout,
        })
    }

    pub fn talk_timeout(&self) -> Duration {
        self.talk_timeout
    }

    /// Wait for a finishing speaker's signal, at most `talk_timeout`.
    pub fn request_talk(&self, agent: AgentId) -> MonitorResult<FloorGrant> {
        self.seating.check(agent)?;
        let deadline = Instant::now() + self.talk_timeout;
        let mut guard = self.seating.lock()?;

        let state = guard.state(agent);
        if matches!(state, State::Hungry | State::Sleeping) {
            return Err(MonitorError::IllegalState { agent, op: Op::RequestFloor, state });
        }

        guard.floor.waiters += 1;
        let outcome = loop {
            if guard.floor.signals > 0 {
                guard.floor.signals -= 1;
                break Ok(FloorGrant::Granted);
            }
            if guard.take_cancel(agent) {
                break Err(MonitorError::Cancelled { agent, op: Op::RequestFloor });
            }
            let now = Instant::now();
            if now >= deadline {
                break Ok(FloorGrant::TimedOut);
            }
            guard = self
                .talk
                .wait_timeout(guard, deadline - now)
                .map_err(|_| MonitorError::Poisoned)?
                .0;
        };
        let talk = &mut guard.floor;
        talk.waiters -= 1;
        // A signal meant for a waiter that just timed out must not carry over
        // to a future requester.
        talk.signals = talk.signals.min(talk.waiters);
        drop(guard);

        if let Ok(FloorGrant::TimedOut) = outcome {
            debug!(%agent, "talk request timed out");
        }
        outcome
    }

    /// Wake exactly one waiting requester; no-op if nobody waits.
    pub fn end_talk(&self) -> MonitorResult<()> {
        let mut guard = self.seating.lock()?;
        let talk = &mut guard.floor;
        if talk.waiters > talk.signals {
            talk.signals += 1;
            self.talk.notify_one();
        }
        Ok(())
    }
}

impl Coordinator for BasicMonitor {
    fn agent_count(&self) -> usize {
        self.seating.count()
    }

    fn acquire_resources(&self, agent: AgentId) -> MonitorResult<Admission> {
        self.seating.acquire(agent)
    }

    fn release_resources(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.release(agent)
    }

    fn request_floor(&self, agent: AgentId) -> MonitorResult<FloorGrant> {
        self.request_talk(agent)
    }

    /// The basic floor has no holder; any seat may end a talk.
    fn release_floor(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.check(agent)?;
        self.end_talk()
    }

    fn cancel(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.flag_cancel(agent, true)?;
        self.talk.notify_all();
        Ok(())
    }

    fn clear_cancel(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.flag_cancel(agent, false)
    }

    fn snapshot(&self) -> MonitorResult<MonitorSnapshot> {
        self.seating.snapshot(|_| None)
    }
}
