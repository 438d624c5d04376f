//! Simulator errors.

use multirun_simulation::HarnessError;
use thiserror::Error;

/// Errors from running the inventory study or writing its outputs.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("harness failed: {0}")]
    Harness(#[from] HarnessError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
