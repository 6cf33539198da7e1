//! Table configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{PhError, PhResult};

// ── Variant ───────────────────────────────────────────────────────────────────

/// Which coordinator the table runs with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// Neighbour-state admission and a timeout-bounded talk floor.
    Basic,
    /// Priority-aware admission, an exclusive floor and the sleep gate.
    #[default]
    Advanced,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Basic    => f.write_str("basic"),
            Variant::Advanced => f.write_str("advanced"),
        }
    }
}

impl FromStr for Variant {
    type Err = PhError;

    fn from_str(s: &str) -> PhResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "basic"    => Ok(Variant::Basic),
            "advanced" => Ok(Variant::Advanced),
            other      => Err(PhError::Config(format!("unknown variant `{other}`"))),
        }
    }
}

// ── TableConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration for one dinner.
///
/// Typically filled from a TOML file and CLI flags by the application crate
/// and handed to the table builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// Number of seats N.  Fixed for the lifetime of the table.
    pub philosophers: usize,

    /// Eat/think/(talk)/(sleep) cycles each philosopher runs.
    pub dining_steps: u32,

    /// Upper bound of every eating, thinking, talking and sleeping interval,
    /// and the talk timeout of the basic coordinator.
    pub time_to_waste_ms: u64,

    /// Master RNG seed.  The same seed always yields the same priorities and
    /// the same per-philosopher draws.
    pub seed: u64,

    /// Chance that a philosopher has something to say after thinking.
    pub talk_probability: f64,

    /// Chance that a philosopher takes a nap after thinking (advanced only).
    pub sleep_probability: f64,

    pub variant: Variant,

    /// Cancel every philosopher once the dinner has run this long.
    /// `None` lets the dinner run to completion.
    pub max_run_ms: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            philosophers:      5,
            dining_steps:      10,
            time_to_waste_ms:  1_000,
            seed:              42,
            talk_probability:  0.5,
            sleep_probability: 0.25,
            variant:           Variant::Advanced,
            max_run_ms:        None,
        }
    }
}

impl TableConfig {
    /// Reject configurations the table cannot run.
    pub fn validate(&self) -> PhResult<()> {
        if self.philosophers == 0 {
            return Err(PhError::InvalidAgentCount(self.philosophers));
        }
        if u32::try_from(self.philosophers).is_err() {
            return Err(PhError::Config(format!(
                "{} philosophers do not fit in an AgentId",
                self.philosophers
            )));
        }
        for (name, p) in [
            ("talk_probability", self.talk_probability),
            ("sleep_probability", self.sleep_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(PhError::Config(format!("{name} must lie in [0, 1], got {p}")));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn time_to_waste(&self) -> Duration {
        Duration::from_millis(self.time_to_waste_ms)
    }

    #[inline]
    pub fn max_run(&self) -> Option<Duration> {
        self.max_run_ms.map(Duration::from_millis)
    }
}
