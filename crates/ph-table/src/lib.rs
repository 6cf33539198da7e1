//! `ph-table`: the philosophers themselves, and the table that runs them.
//!
//! # One seat, one thread
//!
//! ```text
//! for step in 0..config.dining_steps:
//!   ① Eat    acquire_resources, wait, release_resources
//!   ② Think  wait
//!   ③ Talk   with talk_probability: request_floor, say something, wait,
//!            release_floor
//!   ④ Nap    advanced only, with sleep_probability: request_sleep, wait,
//!            end_sleep
//! ```
//!
//! Every wait is a random duration below `time_to_waste_ms`.  A cancelled
//! coordinator call ends the philosopher's loop; any other error stops the
//! whole table.
//!
//! # Crate layout
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`builder`]     | `TableBuilder`                                       |
//! | [`table`]       | `DiningTable::run`, watchdog, panic handling         |
//! | [`philosopher`] | `Philosopher` lifecycle loop                         |
//! | [`observer`]    | `TableObserver`, `NoopObserver`                      |
//! | [`narrator`]    | `TracingNarrator`                                    |
//! | [`phrases`]     | The things philosophers say                          |
//! | [`report`]      | `PhilosopherTally`, `TableReport`                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ph_core::TableConfig;
//! use ph_table::{TableBuilder, TracingNarrator};
//!
//! let table = TableBuilder::new(TableConfig::default()).build()?;
//! let report = table.run(&TracingNarrator)?;
//! println!("{} meals served", report.total_meals());
//! ```

pub mod builder;
pub mod error;
pub mod narrator;
pub mod observer;
pub mod philosopher;
pub mod phrases;
pub mod report;
pub mod table;

#[cfg(test)]
mod tests;

pub use builder::TableBuilder;
pub use error::{TableError, TableResult};
pub use narrator::TracingNarrator;
pub use observer::{NoopObserver, TableObserver};
pub use philosopher::Philosopher;
pub use report::{PhilosopherTally, TableReport};
pub use table::DiningTable;
