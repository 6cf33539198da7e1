//! Per-philosopher tallies and the end-of-dinner report.

use std::time::Duration;

use ph_core::{AgentId, Variant};

/// What one philosopher got done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhilosopherTally {
    pub agent:           AgentId,
    pub meals:           u32,
    /// Meals the philosopher had to wait for.
    pub waited_meals:    u32,
    /// Talks that started with the floor granted.
    pub talks:           u32,
    /// Talks that started after the basic coordinator's timeout.
    pub timed_out_talks: u32,
    pub naps:            u32,
    /// The loop ended before running all of its steps (cancellation or the
    /// table's stop signal).
    pub stopped_early:   bool,
}

impl PhilosopherTally {
    pub fn new(agent: AgentId) -> Self {
        Self {
            agent,
            meals:           0,
            waited_meals:    0,
            talks:           0,
            timed_out_talks: 0,
            naps:            0,
            stopped_early:   false,
        }
    }
}

/// Summary returned by [`DiningTable::run`][crate::DiningTable::run].
#[derive(Clone, Debug)]
pub struct TableReport {
    pub variant: Variant,
    /// Indexed by `AgentId`.
    pub tallies: Vec<PhilosopherTally>,
    pub elapsed: Duration,
}

impl TableReport {
    pub fn total_meals(&self) -> u64 {
        self.tallies.iter().map(|t| t.meals as u64).sum()
    }

    pub fn total_talks(&self) -> u64 {
        self.tallies.iter().map(|t| (t.talks + t.timed_out_talks) as u64).sum()
    }

    pub fn total_naps(&self) -> u64 {
        self.tallies.iter().map(|t| t.naps as u64).sum()
    }

    pub fn stopped_early(&self) -> bool {
        self.tallies.iter().any(|t| t.stopped_early)
    }
}
