//! Fluent builder for constructing a [`DiningTable`].

use ph_core::{PhError, TableConfig, Variant};
use ph_monitor::{BasicMonitor, Coordinator, Monitor, PriorityTable};

use crate::{DiningTable, TableResult};

/// Fluent builder for [`DiningTable`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.priorities(v)`  | Ranks drawn by rejection sampling from the seed |
///
/// # Example
///
/// ```rust,ignore
/// let table = TableBuilder::new(config)
///     .priorities(vec![2, 4, 1, 0, 3])
///     .build()?;
/// let report = table.run(&TracingNarrator)?;
/// ```
pub struct TableBuilder {
    config:     TableConfig,
    priorities: Option<Vec<u32>>,
}

impl TableBuilder {
    pub fn new(config: TableConfig) -> Self {
        Self { config, priorities: None }
    }

    /// Fix the eating ranks instead of drawing them from the seed.
    ///
    /// Must be a permutation of `0..philosophers`.  Only the advanced
    /// variant has priorities; `build` rejects this for the basic one.
    pub fn priorities(mut self, ranks: Vec<u32>) -> Self {
        self.priorities = Some(ranks);
        self
    }

    /// Validate the configuration, build the coordinator for its variant and
    /// return a ready-to-run [`DiningTable`].
    pub fn build(self) -> TableResult<DiningTable> {
        self.config.validate()?;
        let count = self.config.philosophers;

        let coordinator: Box<dyn Coordinator> = match self.config.variant {
            Variant::Basic => {
                if self.priorities.is_some() {
                    return Err(PhError::Config(
                        "the basic variant has no eating priorities".to_owned(),
                    )
                    .into());
                }
                Box::new(BasicMonitor::new(count, self.config.time_to_waste())?)
            }
            Variant::Advanced => {
                let priorities = match self.priorities {
                    Some(ranks) => PriorityTable::from_ranks(ranks)?,
                    None        => PriorityTable::seeded(count, self.config.seed),
                };
                Box::new(Monitor::new(count, priorities)?)
            }
        };

        Ok(DiningTable::new(self.config, coordinator))
    }
}
