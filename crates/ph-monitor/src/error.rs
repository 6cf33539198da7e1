//! Error types for ph-monitor.

use std::fmt;

use ph_core::{AgentId, PhError, State};
use thiserror::Error;

/// The coordinator operation that failed, for error messages and logs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Op {
    AcquireResources,
    ReleaseResources,
    RequestFloor,
    ReleaseFloor,
    RequestSleep,
    EndSleep,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::AcquireResources => "acquire_resources",
            Op::ReleaseResources => "release_resources",
            Op::RequestFloor     => "request_floor",
            Op::ReleaseFloor     => "release_floor",
            Op::RequestSleep     => "request_sleep",
            Op::EndSleep         => "end_sleep",
        };
        f.write_str(s)
    }
}

/// Everything a coordinator call can fail with.
///
/// Nothing is retried internally; every error reaches the calling
/// philosopher, which decides whether to stop or carry on.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("cannot build coordinator: {0}")]
    Construction(#[from] PhError),

    #[error("{agent} is outside a table of {count}")]
    AgentOutOfRange { agent: AgentId, count: usize },

    #[error("{agent} cannot {op} while {state}")]
    IllegalState { agent: AgentId, op: Op, state: State },

    #[error("{agent} released the floor but the holder is {holder:?}")]
    FloorNotHeld { agent: AgentId, holder: Option<AgentId> },

    #[error("{agent} cannot {op} while holding the floor")]
    FloorHeldByCaller { agent: AgentId, op: Op },

    #[error("{op} for {agent} was cancelled")]
    Cancelled { agent: AgentId, op: Op },

    #[error("invalid priority table: {0}")]
    InvalidPriorities(String),

    #[error("coordinator lock poisoned by a panicking philosopher")]
    Poisoned,
}

impl MonitorError {
    /// The interrupted operation, if this is a cancellation.
    #[inline]
    pub fn cancelled_op(&self) -> Option<Op> {
        match self {
            MonitorError::Cancelled { op, .. } => Some(*op),
            _ => None,
        }
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;
