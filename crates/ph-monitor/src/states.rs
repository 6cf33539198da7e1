//! Agent state table.

use ph_core::{AgentId, State};

/// One [`State`] per seat plus a running count per state, so "is anyone
/// sleeping?" costs O(1).
#[derive(Clone, Debug)]
pub(crate) struct StateTable {
    states: Vec<State>,
    counts: [usize; 4],
}

#[inline]
fn slot(state: State) -> usize {
    match state {
        State::Thinking => 0,
        State::Hungry   => 1,
        State::Eating   => 2,
        State::Sleeping => 3,
    }
}

impl StateTable {
    /// Every agent starts out thinking.
    pub fn new(count: usize) -> Self {
        let mut counts = [0; 4];
        counts[slot(State::Thinking)] = count;
        Self { states: vec![State::Thinking; count], counts }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> State {
        self.states[agent.index()]
    }

    pub fn set(&mut self, agent: AgentId, state: State) {
        let old = std::mem::replace(&mut self.states[agent.index()], state);
        self.counts[slot(old)] -= 1;
        self.counts[slot(state)] += 1;
    }

    #[inline]
    pub fn count(&self, state: State) -> usize {
        self.counts[slot(state)]
    }

    pub fn as_slice(&self) -> &[State] {
        &self.states
    }
}
