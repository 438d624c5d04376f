//! Configuration types for the simulator.

use multirun_simulation::MonitorSchedule;
use multirun_types::SimTime;
use serde::{Deserialize, Serialize};

/// Configuration for a multi-replication inventory study.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of independent replications.
    pub replications: usize,

    /// Base random seed. Replication `r` uses `seed + r`.
    pub seed: u64,

    /// Half-width of the Welch moving average applied to the cost series.
    pub welch_window: usize,

    /// Inventory model parameters.
    pub inventory: InventoryConfig,
}

impl SimulatorConfig {
    /// Create a configuration with `replications` runs and default parameters.
    pub fn new(replications: usize) -> Self {
        Self {
            replications,
            seed: 456_987,
            welch_window: 5,
            inventory: InventoryConfig::default(),
        }
    }

    /// Set the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the Welch half-width.
    pub fn with_welch_window(mut self, window: usize) -> Self {
        self.welch_window = window;
        self
    }

    /// Set the inventory parameters.
    pub fn with_inventory(mut self, inventory: InventoryConfig) -> Self {
        self.inventory = inventory;
        self
    }

    /// Seed of replication `replication`.
    pub fn replication_seed(&self, replication: usize) -> u64 {
        self.seed.wrapping_add(replication as u64)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Parameters of the single-item inventory model.
///
/// Time is measured in ticks; `scale` ticks make one month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Ticks per month.
    pub scale: SimTime,

    /// Length of a replication, in months.
    pub months: u64,

    /// Mean time between demands, in months.
    pub demand_interval: f64,

    /// Stock on hand at the start of a replication.
    pub initial_stock: i64,

    /// Reorder point: an order is placed when stock falls below it.
    pub reorder_level: i64,

    /// Order-up-to level.
    pub max_stock: i64,

    /// Shortest delivery lead time, in months.
    pub min_lead_time: f64,

    /// Longest delivery lead time, in months.
    pub max_lead_time: f64,

    /// Fixed cost per order.
    pub setup_cost: f64,

    /// Cost per item ordered.
    pub unit_cost: f64,

    /// Holding cost per item per month.
    pub holding_cost: f64,

    /// Backlog cost per item per month.
    pub shortage_cost: f64,

    /// Cumulative probabilities of demand sizes 1, 2, 3 (4 otherwise).
    pub demand_distribution: [f64; 3],

    /// Months between consecutive monitor instants. Past the end of the
    /// list monitoring stops.
    pub monitor_months: Vec<f64>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            scale: 100,
            months: 120,
            demand_interval: 0.1,
            initial_stock: 50,
            reorder_level: 10,
            max_stock: 50,
            min_lead_time: 0.5,
            max_lead_time: 1.0,
            setup_cost: 30.0,
            unit_cost: 3.0,
            holding_cost: 1.0,
            shortage_cost: 5.0,
            demand_distribution: [0.1, 0.4, 0.8],
            monitor_months: vec![1.0, 1.0, 1.0, 7.0, 10.0, 30.0, 30.0, 20.0, 20.0],
        }
    }
}

impl InventoryConfig {
    /// Set the run length in months.
    pub fn with_months(mut self, months: u64) -> Self {
        self.months = months;
        self
    }

    /// Set the reorder point and order-up-to level.
    pub fn with_policy(mut self, reorder_level: i64, max_stock: i64) -> Self {
        self.reorder_level = reorder_level;
        self.max_stock = max_stock;
        self
    }

    /// Set the holding and shortage costs.
    pub fn with_costs(mut self, holding: f64, shortage: f64) -> Self {
        self.holding_cost = holding;
        self.shortage_cost = shortage;
        self
    }

    /// Set the monitor intervals, in months.
    pub fn with_monitor_months(mut self, months: Vec<f64>) -> Self {
        self.monitor_months = months;
        self
    }

    /// Convert months to ticks.
    pub fn ticks(&self, months: f64) -> SimTime {
        (months * self.scale as f64).round() as SimTime
    }

    /// Replication length in ticks.
    pub fn end_time(&self) -> SimTime {
        self.months * self.scale
    }

    /// Monitor schedule following `monitor_months`.
    pub fn monitor_schedule(&self) -> MonitorSchedule {
        MonitorSchedule::intervals(self.monitor_months.iter().map(|&m| self.ticks(m)).collect())
    }
}
