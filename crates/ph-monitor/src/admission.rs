//! Admission engine: decides who may start eating.
//!
//! `Dining` bundles the state table, the chopstick ledger and the optional
//! priority table.  It is pure data plus the admission predicate; the
//! coordinators own it behind their single lock and wake whoever it admits.
//!
//! # Re-test policy
//!
//! Releasing always re-tests the right neighbour, then the left one.  With
//! priorities on, the gate is global (any higher-ranked hungry agent blocks),
//! so after the neighbour re-tests every hungry agent is re-tested in ring
//! order until a full pass admits nobody.  The same rescan runs when a hungry
//! agent withdraws.  Without that rescan the top-ranked hungry agent could be
//! a non-neighbour of every releaser and never be looked at again.

use ph_core::{AgentId, Ring, State};

use crate::ledger::ChopstickLedger;
use crate::priority::PriorityTable;
use crate::states::StateTable;

pub(crate) struct Dining {
    pub ring:       Ring,
    pub states:     StateTable,
    pub ledger:     ChopstickLedger,
    pub priorities: Option<PriorityTable>,
}

impl Dining {
    pub fn new(count: usize, priorities: Option<PriorityTable>) -> Self {
        Self {
            ring:   Ring::new(count),
            states: StateTable::new(count),
            ledger: ChopstickLedger::new(count),
            priorities,
        }
    }

    /// The admission predicate.
    pub fn may_eat(&self, agent: AgentId) -> bool {
        if !self.states.get(agent).is_hungry() {
            return false;
        }
        let neighbours_idle = !self.states.get(self.ring.right(agent)).is_eating()
            && !self.states.get(self.ring.left(agent)).is_eating();
        let pair_free = self.ledger.pair_free(self.ring, agent);
        debug_assert_eq!(neighbours_idle, pair_free, "ledger out of sync for {agent}");

        neighbours_idle
            && pair_free
            && !self
                .priorities
                .as_ref()
                .is_some_and(|p| p.outranked(self.ring, agent, &self.states))
    }

    /// Admit `agent` if the predicate holds.  Returns `true` on admission;
    /// the caller must then wake that agent.
    pub fn test(&mut self, agent: AgentId) -> bool {
        if !self.may_eat(agent) {
            return false;
        }
        self.ledger.pick_up(self.ring, agent);
        self.states.set(agent, State::Eating);
        true
    }

    /// Put `agent`'s chopsticks down and re-test.  Returns everyone admitted
    /// as a result, in admission order.
    pub fn release(&mut self, agent: AgentId) -> Vec<AgentId> {
        self.ledger.put_down(self.ring, agent);
        self.states.set(agent, State::Thinking);

        let mut admitted = Vec::new();
        for neighbour in [self.ring.right(agent), self.ring.left(agent)] {
            if self.test(neighbour) {
                admitted.push(neighbour);
            }
        }
        if self.priorities.is_some() {
            admitted.extend(self.rescan());
        }
        admitted
    }

    /// A hungry `agent` gives up and goes back to thinking.
    pub fn withdraw(&mut self, agent: AgentId) -> Vec<AgentId> {
        debug_assert!(self.states.get(agent).is_hungry());
        self.states.set(agent, State::Thinking);
        if self.priorities.is_some() { self.rescan() } else { Vec::new() }
    }

    /// Re-test every hungry agent until a full pass admits nobody.
    fn rescan(&mut self) -> Vec<AgentId> {
        let mut admitted = Vec::new();
        loop {
            let before = admitted.len();
            for agent in self.ring.agents() {
                if self.test(agent) {
                    admitted.push(agent);
                }
            }
            if admitted.len() == before {
                return admitted;
            }
        }
    }
}
