//! Drives the inventory model through the multi-replication harness.

use crate::config::SimulatorConfig;
use crate::error::SimulatorError;
use crate::inventory::{self, InventoryEvent, InventoryModel};
use crate::metrics::InventoryReport;
use multirun_engine::SmplEngine;
use multirun_simulation::{CsvFormat, MultiRun, RunConfig, Sinks};
use tracing::info;

/// Multi-replication inventory study.
///
/// Every replication gets a fresh [`SmplEngine`] seeded from the base seed,
/// so a study is reproducible for a given configuration.
pub struct Simulator {
    config: SimulatorConfig,
    csv_format: CsvFormat,
}

impl Simulator {
    /// Create a study with `config` and the default CSV format.
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            csv_format: CsvFormat::default(),
        }
    }

    /// Use `format` for the harness CSV output.
    pub fn with_csv_format(mut self, format: CsvFormat) -> Self {
        self.csv_format = format;
        self
    }

    /// Study configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run all replications, streaming harness reports to `sinks`.
    pub fn run(&self, sinks: Sinks<'_>) -> Result<InventoryReport, SimulatorError> {
        let inventory_config = &self.config.inventory;
        info!(
            replications = self.config.replications,
            seed = self.config.seed,
            months = inventory_config.months,
            reorder_level = inventory_config.reorder_level,
            max_stock = inventory_config.max_stock,
            "Starting inventory study"
        );

        let mut harness = MultiRun::new(inventory::handlers(), inventory::resources())?
            .with_csv_format(self.csv_format);
        let run_config = RunConfig::new(self.config.replications, InventoryEvent::Start.id())
            .with_monitor(inventory_config.monitor_schedule());

        let mut model = InventoryModel::new(inventory_config.clone());
        let summary = harness.run(
            &mut model,
            &run_config,
            |replication| SmplEngine::new(self.config.replication_seed(replication)),
            sinks,
        )?;

        let (costs, outcomes) = model.into_results();
        let report = InventoryReport::new(
            self.config.seed,
            summary,
            costs,
            outcomes,
            self.config.welch_window,
        );

        if let Some(outcome) = &report.mean_outcome {
            info!(
                total_cost_per_month = outcome.total_cost_per_month,
                avg_shortage = outcome.avg_shortage,
                "Inventory study complete"
            );
        }
        Ok(report)
    }
}
