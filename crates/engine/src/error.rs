//! Error types for engine resource operations.

use multirun_types::{DeviceId, QueueId};
use thiserror::Error;

/// Errors raised by device and queue operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The device handle was never registered with this engine.
    #[error("Unknown device: {0}")]
    UnknownDevice(DeviceId),

    /// The queue handle was never registered with this engine.
    #[error("Unknown queue: {0}")]
    UnknownQueue(QueueId),

    /// Release was requested for a device nobody holds.
    #[error("{0} released while idle")]
    DeviceIdle(DeviceId),
}
