//! Lock, per-seat wait conditions and the eat/release protocol shared by both
//! coordinators.
//!
//! `Seating<F>` holds the one coordinator-wide mutex.  Everything shared
//! lives behind it: the [`Dining`] tables, the pending cancellation flags and
//! the floor state `F` of the concrete coordinator.  Each seat has a private
//! `Condvar` it waits on while hungry; whoever admits it signals exactly that
//! condvar.

use std::sync::{Condvar, Mutex, MutexGuard};

use ph_core::{AgentId, PhError, Ring, State};

use crate::admission::Dining;
use crate::coordinator::Admission;
use crate::priority::PriorityTable;
use crate::snapshot::MonitorSnapshot;
use crate::{MonitorError, MonitorResult, Op};

/// State guarded by the coordinator lock.
pub(crate) struct Shared<F> {
    pub dining: Dining,
    cancel:     Vec<bool>,
    pub floor:  F,
}

impl<F> Shared<F> {
    /// Consume a pending cancellation for `agent`, if any.
    pub fn take_cancel(&mut self, agent: AgentId) -> bool {
        std::mem::take(&mut self.cancel[agent.index()])
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> State {
        self.dining.states.get(agent)
    }
}

pub(crate) struct Seating<F> {
    shared: Mutex<Shared<F>>,
    eat:    Vec<Condvar>,
    ring:   Ring,
}

impl<F> Seating<F> {
    pub fn new(count: usize, priorities: Option<PriorityTable>, floor: F) -> MonitorResult<Self> {
        if count == 0 {
            return Err(PhError::InvalidAgentCount(count).into());
        }
        if u32::try_from(count).is_err() {
            return Err(PhError::Config(format!("{count} seats do not fit in an AgentId")).into());
        }
        if let Some(p) = &priorities {
            if p.len() != count {
                return Err(MonitorError::InvalidPriorities(format!(
                    "{} ranks for {count} seats",
                    p.len()
                )));
            }
        }
        Ok(Self {
            shared: Mutex::new(Shared {
                dining: Dining::new(count, priorities),
                cancel: vec![false; count],
                floor,
            }),
            eat: (0..count).map(|_| Condvar::new()).collect(),
            ring: Ring::new(count),
        })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.ring.size()
    }

    pub fn check(&self, agent: AgentId) -> MonitorResult<()> {
        if self.ring.contains(agent) {
            Ok(())
        } else {
            Err(MonitorError::AgentOutOfRange { agent, count: self.count() })
        }
    }

    pub fn lock(&self) -> MonitorResult<MutexGuard<'_, Shared<F>>> {
        self.shared.lock().map_err(|_| MonitorError::Poisoned)
    }

    /// Block on `condvar`, releasing the lock until woken.
    pub fn wait<'a>(
        &self,
        condvar: &Condvar,
        guard:   MutexGuard<'a, Shared<F>>,
    ) -> MonitorResult<MutexGuard<'a, Shared<F>>> {
        condvar.wait(guard).map_err(|_| MonitorError::Poisoned)
    }

    fn wake(&self, admitted: &[AgentId]) {
        for agent in admitted {
            self.eat[agent.index()].notify_one();
        }
    }

    // ── Eating protocol ───────────────────────────────────────────────────

    /// Become hungry and block until admitted.
    pub fn acquire(&self, agent: AgentId) -> MonitorResult<Admission> {
        self.check(agent)?;
        let mut guard = self.lock()?;

        let state = guard.state(agent);
        if state != State::Thinking {
            return Err(MonitorError::IllegalState { agent, op: Op::AcquireResources, state });
        }
        guard.dining.states.set(agent, State::Hungry);
        if guard.dining.test(agent) {
            return Ok(Admission { waited: false });
        }

        loop {
            if guard.state(agent).is_eating() {
                return Ok(Admission { waited: true });
            }
            if guard.take_cancel(agent) {
                let admitted = guard.dining.withdraw(agent);
                self.wake(&admitted);
                return Err(MonitorError::Cancelled { agent, op: Op::AcquireResources });
            }
            guard = self.wait(&self.eat[agent.index()], guard)?;
        }
    }

    /// Stop eating and let the neighbours (and, with priorities, every
    /// hungry agent) try again.
    pub fn release(&self, agent: AgentId) -> MonitorResult<()> {
        self.check(agent)?;
        let mut guard = self.lock()?;

        let state = guard.state(agent);
        if state != State::Eating {
            return Err(MonitorError::IllegalState { agent, op: Op::ReleaseResources, state });
        }
        let admitted = guard.dining.release(agent);
        self.wake(&admitted);
        Ok(())
    }

    /// Same as [`release`](Self::release) but for a caller already holding
    /// the lock.
    pub fn release_locked(&self, guard: &mut Shared<F>, agent: AgentId) {
        let admitted = guard.dining.release(agent);
        self.wake(&admitted);
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    /// Record a cancellation for `agent` and wake its seat condvar.  The
    /// concrete coordinator wakes its floor condvar itself.
    pub fn flag_cancel(&self, agent: AgentId, pending: bool) -> MonitorResult<()> {
        self.check(agent)?;
        let mut guard = self.lock()?;
        guard.cancel[agent.index()] = pending;
        if pending {
            self.eat[agent.index()].notify_one();
        }
        Ok(())
    }

    pub fn snapshot(&self, floor_holder: impl FnOnce(&F) -> Option<AgentId>) -> MonitorResult<MonitorSnapshot> {
        let guard = self.lock()?;
        Ok(MonitorSnapshot {
            states:       guard.dining.states.as_slice().to_vec(),
            chopsticks:   guard.dining.ledger.to_vec(),
            floor_holder: floor_holder(&guard.floor),
            ranks:        guard.dining.priorities.as_ref().map(|p| p.as_slice().to_vec()),
        })
    }
}
