//! Multi-replication inventory simulator.
//!
//! A single-item inventory model with an (s, S) review policy, driven by
//! `multirun-simulation` over the reference `multirun-engine`.
//!
//! Each replication starts from the configured stock level and a seed
//! derived from the base seed. The model samples its monthly cost at
//! every monitor instant; the simulator averages those samples across
//! replications and applies a Welch moving average to expose the warm-up
//! period. The harness itself reports statistics of the `orders` queue.
//!
//! # Example
//!
//! ```ignore
//! use multirun_simulation::Sinks;
//! use multirun_simulator::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(10).with_seed(42).with_welch_window(3);
//! let report = Simulator::new(config).run(Sinks::none())?;
//!
//! println!("{:?}", report.smoothed_cost);
//! ```

pub mod config;
mod error;
pub mod inventory;
pub mod metrics;
pub mod runner;

pub use config::{InventoryConfig, SimulatorConfig};
pub use error::SimulatorError;
pub use inventory::{InventoryEvent, InventoryModel, ReplicationOutcome};
pub use metrics::InventoryReport;
pub use runner::Simulator;
