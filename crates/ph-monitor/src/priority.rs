//! Eating priorities.

use ph_core::{AgentId, Ring, State, TableRng, assign_priorities};

use crate::states::StateTable;
use crate::{MonitorError, MonitorResult};

/// Immutable rank per seat; a higher rank eats first.
///
/// Ranks form a permutation of `0..N`.  The table never changes after the
/// coordinator is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorityTable {
    ranks: Vec<u32>,
}

impl PriorityTable {
    /// Build from explicit ranks indexed by `AgentId`.
    ///
    /// Fails unless `ranks` is a permutation of `0..ranks.len()`.
    pub fn from_ranks(ranks: Vec<u32>) -> MonitorResult<Self> {
        let mut seen = vec![false; ranks.len()];
        for (seat, &rank) in ranks.iter().enumerate() {
            let Some(flag) = seen.get_mut(rank as usize) else {
                return Err(MonitorError::InvalidPriorities(format!(
                    "seat {seat} has rank {rank}, outside 0..{}",
                    ranks.len()
                )));
            };
            if *flag {
                return Err(MonitorError::InvalidPriorities(format!(
                    "rank {rank} assigned twice"
                )));
            }
            *flag = true;
        }
        Ok(Self { ranks })
    }

    /// Draw a fresh random permutation from `seed`.
    pub fn seeded(count: usize, seed: u64) -> Self {
        let mut rng = TableRng::new(seed);
        Self { ranks: assign_priorities(count, rng.inner()) }
    }

    #[inline]
    pub fn rank(&self, agent: AgentId) -> u32 {
        self.ranks[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ranks
    }

    /// Some other hungry agent has a strictly higher rank than `agent`.
    pub(crate) fn outranked(&self, ring: Ring, agent: AgentId, states: &StateTable) -> bool {
        let mine = self.rank(agent);
        ring.agents()
            .any(|other| other != agent && states.get(other) == State::Hungry && self.rank(other) > mine)
    }
}
