//! Point-in-time copy of the coordinator tables.

use ph_core::{AgentId, Ring, State};

/// Taken under the coordinator lock, so all fields are mutually consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorSnapshot {
    /// Indexed by `AgentId`.
    pub states:       Vec<State>,
    /// Holder of each chopstick, indexed by `ChopstickId`.
    pub chopsticks:   Vec<Option<AgentId>>,
    /// Always `None` for the basic coordinator, which has no exclusive floor.
    pub floor_holder: Option<AgentId>,
    /// `None` when admission ignores priorities.
    pub ranks:        Option<Vec<u32>>,
}

impl MonitorSnapshot {
    #[inline]
    pub fn state(&self, agent: AgentId) -> State {
        self.states[agent.index()]
    }

    pub fn agents_in(&self, state: State) -> Vec<AgentId> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(_, s)| *s == state)
            .map(|(i, _)| AgentId(i as u32))
            .collect()
    }

    /// No two neighbours are eating at the same time.
    pub fn no_adjacent_eaters(&self) -> bool {
        if self.states.len() < 2 {
            return true;
        }
        let ring = Ring::new(self.states.len());
        ring.agents()
            .filter(|&a| self.state(a).is_eating())
            .all(|a| !self.state(ring.right(a)).is_eating())
    }

    /// An agent is eating iff it holds both of its chopsticks, and nobody
    /// else holds any chopstick.
    pub fn ledger_consistent(&self) -> bool {
        if self.states.is_empty() {
            return true;
        }
        let ring = Ring::new(self.states.len());
        ring.agents().all(|a| {
            let (own, right) = ring.chopsticks(a);
            let holds = self.chopsticks[own.index()] == Some(a)
                && self.chopsticks[right.index()] == Some(a);
            holds == self.state(a).is_eating()
        }) && self
            .chopsticks
            .iter()
            .flatten()
            .all(|holder| self.state(*holder).is_eating())
    }
}
