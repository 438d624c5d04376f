//! Replication-and-statistics harness.
//!
//! Runs a discrete-event model through many independent replications,
//! samples device and queue counters at scheduled monitor instants, and
//! averages them across replications into time series.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  MultiRun (per replication)             │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  fresh Engine ── cause() ──► HandlerTable          │ │
//! │  │                     │                              │ │
//! │  │          monitor event? ──► sample_engine          │ │
//! │  └─────────────────────┬──────────────────────────────┘ │
//! │                        ▼                                │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  MetricSeries sums, one slot per monitor index     │ │
//! │  └─────────────────────┬──────────────────────────────┘ │
//! └────────────────────────┼────────────────────────────────┘
//!                          ▼
//!        RunSummary (sums / N) ──► Table ──► text / CSV
//!                          └──► welch ──► text / CSV
//! ```
//!
//! Replications run strictly in sequence, so the shared sums need no
//! locking.

mod accumulator;
mod config;
mod error;
mod handlers;
pub mod render;
mod report;
mod runner;
mod sampler;
mod summary;
mod table;
mod welch;

pub use accumulator::{DeviceMetrics, MetricSeries, QueueMetrics};
pub use config::{MonitorSchedule, RunConfig};
pub use error::{BoxError, HarnessError};
pub use handlers::{Handler, HandlerResult, HandlerTable};
pub use render::{csv_rows, render_csv, render_text, CsvFormat, TextFormat, PLACEHOLDER};
pub use report::{write_csv_report, write_text_report};
pub use runner::{MultiRun, Sinks};
pub use sampler::{sample_engine, update_device, update_queue, DeviceSample, QueueSample};
pub use summary::{DeviceSeries, QueueSeries, RunSummary};
pub use table::Table;
pub use welch::welch;
