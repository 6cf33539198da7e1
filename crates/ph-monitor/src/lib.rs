//! `ph-monitor`: the coordinator at the centre of the dining table.
//!
//! One mutex guards every shared table (agent states, chopstick ledger,
//! priorities, floor).  Waiting always happens on a condvar tied to that
//! mutex, so a blocked philosopher never holds the lock and every wake-up
//! re-checks its predicate.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`coordinator`] | `Coordinator` / `SleepGate` traits, `Admission`, `FloorGrant` |
//! | [`basic`]       | `BasicMonitor`: neighbour admission, timed talk floor   |
//! | [`monitor`]     | `Monitor`: priority admission, exclusive floor, sleep gate |
//! | [`priority`]    | `PriorityTable`                                          |
//! | [`snapshot`]    | `MonitorSnapshot` and its invariant checks               |
//! | [`error`]       | `MonitorError`, `MonitorResult<T>`, `Op`                 |
//!
//! # Quick-start
//!
//! ```rust
//! use ph_core::AgentId;
//! use ph_monitor::{Coordinator, Monitor, SleepGate};
//!
//! let monitor = Monitor::seeded(5, 42).unwrap();
//! monitor.acquire_resources(AgentId(0)).unwrap();
//! monitor.release_resources(AgentId(0)).unwrap();
//! monitor.request_sleep(AgentId(3)).unwrap();
//! monitor.end_sleep(AgentId(3)).unwrap();
//! ```

mod admission;
mod ledger;
mod seating;
mod states;

pub mod basic;
pub mod coordinator;
pub mod error;
pub mod monitor;
pub mod priority;
pub mod snapshot;


pub use basic::BasicMonitor;
pub use coordinator::{Admission, Coordinator, FloorGrant, SleepGate};
pub use error::{MonitorError, MonitorResult, Op};
pub use monitor::Monitor;
pub use priority::PriorityTable;
pub use snapshot::MonitorSnapshot;
