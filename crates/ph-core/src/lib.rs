//! `ph-core`: foundational types for the dining table coordinator.
//!
//! This crate is a dependency of every other `ph-*` crate.  It has no `ph-*`
//! dependencies and only `rand` and `thiserror` as external ones (plus the
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `ChopstickId`, ring neighbour arithmetic        |
//! | [`state`]  | `State` (THINKING / HUNGRY / EATING / SLEEPING)            |
//! | [`config`] | `TableConfig`, `Variant`                                   |
//! | [`rng`]    | `AgentRng`, `TableRng`, `assign_priorities`                |
//! | [`error`]  | `PhError`, `PhResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and state types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{TableConfig, Variant};
pub use error::{PhError, PhResult};
pub use ids::{AgentId, ChopstickId, Ring};
pub use rng::{AgentRng, TableRng, assign_priorities};
pub use state::State;
