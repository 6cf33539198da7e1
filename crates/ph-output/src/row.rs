//! Plain data row types written by output backends.

/// One lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    /// Position in the log.  Assigned in the order events reach the log,
    /// which is not necessarily the order the coordinator saw them.
    pub seq:    u64,
    pub agent:  u32,
    pub event:  &'static str,
    /// Event-specific extra: a rank, whether a meal was waited for, the
    /// phrase spoken, the cancelled operation.  Empty when there is none.
    pub detail: String,
}

/// One philosopher's totals at the end of the dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub agent:           u32,
    pub meals:           u32,
    pub waited_meals:    u32,
    pub talks:           u32,
    pub timed_out_talks: u32,
    pub naps:            u32,
    pub stopped_early:   bool,
}
