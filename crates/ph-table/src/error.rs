use ph_core::{AgentId, PhError};
use ph_monitor::MonitorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table configuration error: {0}")]
    Config(#[from] PhError),

    #[error("coordinator error: {0}")]
    Monitor(#[from] MonitorError),

    #[error("{0} panicked")]
    Panicked(AgentId),
}

pub type TableResult<T> = Result<T, TableError>;
