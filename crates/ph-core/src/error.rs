//! Base error type shared by the `ph-*` crates.
//!
//! Sub-crates define their own error enums and wrap `PhError` as one variant
//! through a `#[from]` conversion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhError {
    #[error("a table needs at least one philosopher, got {0}")]
    InvalidAgentCount(usize),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ph-core`.
pub type PhResult<T> = Result<T, PhError>;
