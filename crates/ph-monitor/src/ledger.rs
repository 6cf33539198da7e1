//! Chopstick ledger: who holds which chopstick.

use ph_core::{AgentId, ChopstickId, Ring};

/// Holder of every chopstick on the ring, indexed by `ChopstickId`.
///
/// Pure state: the admission engine consults it and updates it, always under
/// the coordinator lock.
#[derive(Clone, Debug)]
pub(crate) struct ChopstickLedger {
    holders: Vec<Option<AgentId>>,
}

impl ChopstickLedger {
    pub fn new(count: usize) -> Self {
        Self { holders: vec![None; count] }
    }

    #[inline]
    pub fn holder(&self, chopstick: ChopstickId) -> Option<AgentId> {
        self.holders[chopstick.index()]
    }

    /// Both chopsticks `agent` needs are on the table.
    pub fn pair_free(&self, ring: Ring, agent: AgentId) -> bool {
        let (own, right) = ring.chopsticks(agent);
        self.holder(own).is_none() && self.holder(right).is_none()
    }

    /// `agent` holds both of its chopsticks.
    pub fn holds_pair(&self, ring: Ring, agent: AgentId) -> bool {
        let (own, right) = ring.chopsticks(agent);
        self.holder(own) == Some(agent) && self.holder(right) == Some(agent)
    }

    pub fn pick_up(&mut self, ring: Ring, agent: AgentId) {
        debug_assert!(self.pair_free(ring, agent), "{agent} picked up a held chopstick");
        let (own, right) = ring.chopsticks(agent);
        self.holders[own.index()] = Some(agent);
        self.holders[right.index()] = Some(agent);
    }

    pub fn put_down(&mut self, ring: Ring, agent: AgentId) {
        debug_assert!(self.holds_pair(ring, agent), "{agent} put down chopsticks it does not hold");
        let (own, right) = ring.chopsticks(agent);
        self.holders[own.index()] = None;
        self.holders[right.index()] = None;
    }

    pub fn to_vec(&self) -> Vec<Option<AgentId>> {
        self.holders.clone()
    }
}
