//! Deterministic per-philosopher and table-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each philosopher gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive seats uniformly across the seed space.  Draws
//! stay local to the philosopher's own thread, so the sequence of durations
//! and decisions an agent sees does not depend on thread interleaving.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-philosopher deterministic RNG.  Owned by the philosopher's thread.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a seat.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── TableRng ──────────────────────────────────────────────────────────────────

/// Table-level RNG for one-off draws made while the table is set up
/// (priority assignment).
pub struct TableRng(SmallRng);

impl TableRng {
    pub fn new(seed: u64) -> Self {
        TableRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` APIs and
    /// [`assign_priorities`].
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── Priority assignment ───────────────────────────────────────────────────────

/// Give each of `n` seats a distinct rank in `[0, n)` by rejection sampling.
///
/// Sweeps the seats repeatedly; every still-unranked seat draws a candidate
/// rank and keeps it only if no other seat holds it yet.  The result is
/// indexed by `AgentId` and is always a permutation of `0..n`.
pub fn assign_priorities<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<u32> {
    let mut ranks: Vec<Option<u32>> = vec![None; n];
    let mut taken = vec![false; n];
    let mut remaining = n;

    while remaining > 0 {
        for slot in ranks.iter_mut().filter(|r| r.is_none()) {
            let candidate = rng.gen_range(0..n);
            if !taken[candidate] {
                taken[candidate] = true;
                *slot = Some(candidate as u32);
                remaining -= 1;
            }
        }
    }

    ranks.into_iter().flatten().collect()
}
