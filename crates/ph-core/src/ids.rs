//! Strongly typed identifiers and ring arithmetic.
//!
//! Agents and chopsticks are both numbered `0..N` around the table.  Chopstick
//! `i` lies between agent `i - 1` and agent `i`, so agent `id` eats with
//! chopsticks `id` and `id + 1` (all indices mod N).

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Seat of a philosopher at the table.
    pub struct AgentId(u32);
}

typed_id! {
    /// Position of a chopstick on the table.
    pub struct ChopstickId(u32);
}

// ── Ring ──────────────────────────────────────────────────────────────────────

/// Neighbour arithmetic for a fixed ring of `size` seats.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Ring {
    size: usize,
}

impl Ring {
    /// `size` must be non-zero; the coordinator validates this before building
    /// a ring.
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "ring of zero seats");
        Self { size }
    }

    #[inline]
    pub fn size(self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(self, agent: AgentId) -> bool {
        agent.index() < self.size
    }

    /// The neighbour at `id + 1`.
    #[inline]
    pub fn right(self, agent: AgentId) -> AgentId {
        AgentId(((agent.index() + 1) % self.size) as u32)
    }

    /// The neighbour at `id - 1`.
    #[inline]
    pub fn left(self, agent: AgentId) -> AgentId {
        AgentId(((agent.index() + self.size - 1) % self.size) as u32)
    }

    /// The two chopsticks `agent` needs, as `(own, right)`.
    ///
    /// With a single seat both entries name the same chopstick.
    #[inline]
    pub fn chopsticks(self, agent: AgentId) -> (ChopstickId, ChopstickId) {
        (
            ChopstickId(agent.0),
            ChopstickId(((agent.index() + 1) % self.size) as u32),
        )
    }

    /// Every seat in ascending order.
    pub fn agents(self) -> impl Iterator<Item = AgentId> {
        (0..self.size as u32).map(AgentId)
    }
}
