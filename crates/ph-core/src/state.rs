//! Per-agent coordinator state.

use std::fmt;

/// What a philosopher is doing, as far as the coordinator is concerned.
///
/// Main cycle: `Thinking → Hungry → Eating → Thinking`.
/// Sleep cycle (advanced coordinator only): `Thinking | Eating → Sleeping →
/// Thinking`.  Talking is not a state; it is tracked by the floor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum State {
    #[default]
    Thinking,
    Hungry,
    Eating,
    Sleeping,
}

impl State {
    #[inline]
    pub fn is_eating(self) -> bool {
        self == State::Eating
    }

    #[inline]
    pub fn is_hungry(self) -> bool {
        self == State::Hungry
    }

    #[inline]
    pub fn is_sleeping(self) -> bool {
        self == State::Sleeping
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Thinking => "thinking",
            State::Hungry   => "hungry",
            State::Eating   => "eating",
            State::Sleeping => "sleeping",
        };
        f.write_str(s)
    }
}
