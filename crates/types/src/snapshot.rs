//! Point-in-time views of engine resources.
//!
//! Engines hand these out at monitor instants. All sums are cumulative
//! since the start of the replication and include whatever has accrued up
//! to the engine's current time.

use crate::SimTime;
use serde::{Deserialize, Serialize};

/// Cumulative counters of one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Total time the device has been reserved.
    pub busy_time_sum: SimTime,
    /// Number of completed reservations.
    pub transact_count: u64,
}

/// Cumulative counters of one queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Total time spent waiting by every item that has left the queue.
    pub wait_time_sum: SimTime,
    /// Number of items that have left the queue.
    pub served: u64,
    /// Integral of queue length over time (length × ticks held).
    pub length_time_sum: u64,
    /// Current number of items in the queue.
    pub length: usize,
}
