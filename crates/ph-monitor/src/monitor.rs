//! The advanced coordinator: priority-aware admission, an exclusive floor and
//! the sleep gate.
//!
//! Floor and sleep requests share one broadcast condvar.  Eligibility for the
//! floor depends on two facts (nobody holds it, nobody sleeps) and either can
//! change under any waiter, so every change wakes everyone and each waiter
//! re-checks its own predicate.

use std::sync::Condvar;

use ph_core::{AgentId, State};
use tracing::{debug, warn};

use crate::coordinator::{Admission, Coordinator, FloorGrant, SleepGate};
use crate::priority::PriorityTable;
use crate::seating::Seating;
use crate::{MonitorError, MonitorResult, MonitorSnapshot, Op};

/// Holder of the speaking floor.
#[derive(Default)]
pub(crate) struct Floor {
    holder: Option<AgentId>,
}

pub struct Monitor {
    seating: Seating<Floor>,
    floor:   Condvar,
}

impl Monitor {
    /// Build a coordinator for `count` seats with the given eating ranks.
    pub fn new(count: usize, priorities: PriorityTable) -> MonitorResult<Self> {
        Ok(Self {
            seating: Seating::new(count, Some(priorities), Floor::default())?,
            floor:   Condvar::new(),
        })
    }

    /// Build with ranks drawn by rejection sampling from `seed`.
    pub fn seeded(count: usize, seed: u64) -> MonitorResult<Self> {
        Self::new(count, PriorityTable::seeded(count, seed))
    }

    /// Current floor holder.
    pub fn floor_holder(&self) -> MonitorResult<Option<AgentId>> {
        Ok(self.seating.lock()?.floor.holder)
    }

    /// Block while the floor is held or anyone sleeps, then take the floor.
    pub fn request_floor(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.check(agent)?;
        let mut guard = self.seating.lock()?;

        let state = guard.state(agent);
        if matches!(state, State::Hungry | State::Sleeping) {
            return Err(MonitorError::IllegalState { agent, op: Op::RequestFloor, state });
        }
        if guard.floor.holder == Some(agent) {
            return Err(MonitorError::FloorHeldByCaller { agent, op: Op::RequestFloor });
        }

        while guard.floor.holder.is_some() || guard.dining.states.count(State::Sleeping) > 0 {
            if guard.take_cancel(agent) {
                return Err(MonitorError::Cancelled { agent, op: Op::RequestFloor });
            }
            guard = self.seating.wait(&self.floor, guard)?;
        }
        guard.floor.holder = Some(agent);
        Ok(())
    }

    /// Hand the floor back and wake every blocked floor and sleep request.
    pub fn release_floor(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.check(agent)?;
        let mut guard = self.seating.lock()?;

        let holder = guard.floor.holder;
        if holder != Some(agent) {
            drop(guard);
            warn!(%agent, ?holder, "floor released by a non-holder");
            return Err(MonitorError::FloorNotHeld { agent, holder });
        }
        guard.floor.holder = None;
        self.floor.notify_all();
        Ok(())
    }
}

impl SleepGate for Monitor {
    fn request_sleep(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.check(agent)?;
        let mut guard = self.seating.lock()?;

        let state = guard.state(agent);
        if !matches!(state, State::Thinking | State::Eating) {
            return Err(MonitorError::IllegalState { agent, op: Op::RequestSleep, state });
        }
        if guard.floor.holder == Some(agent) {
            return Err(MonitorError::FloorHeldByCaller { agent, op: Op::RequestSleep });
        }

        while guard.floor.holder.is_some() {
            if guard.take_cancel(agent) {
                return Err(MonitorError::Cancelled { agent, op: Op::RequestSleep });
            }
            guard = self.seating.wait(&self.floor, guard)?;
        }

        // Only this agent changes its own state out of thinking/eating, so
        // `state` still holds.
        if state.is_eating() {
            self.seating.release_locked(&mut guard, agent);
        }
        guard.dining.states.set(agent, State::Sleeping);
        drop(guard);

        debug!(%agent, "fell asleep");
        Ok(())
    }

    fn end_sleep(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.check(agent)?;
        let mut guard = self.seating.lock()?;

        let state = guard.state(agent);
        if state != State::Sleeping {
            return Err(MonitorError::IllegalState { agent, op: Op::EndSleep, state });
        }
        guard.dining.states.set(agent, State::Thinking);
        self.floor.notify_all();
        Ok(())
    }
}

impl Coordinator for Monitor {
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
        Monitor::request_floor(self, agent).map(|()| FloorGrant::Granted)
    }

    fn release_floor(&self, agent: AgentId) -> MonitorResult<()> {
        Monitor::release_floor(self, agent)
    }

    fn cancel(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.flag_cancel(agent, true)?;
        self.floor.notify_all();
        Ok(())
    }

    fn clear_cancel(&self, agent: AgentId) -> MonitorResult<()> {
        self.seating.flag_cancel(agent, false)
    }

    fn snapshot(&self) -> MonitorResult<MonitorSnapshot> {
        self.seating.snapshot(|floor| floor.holder)
    }

    fn sleep_gate(&self) -> Option<&dyn SleepGate> {
        Some(self)
    }
}
