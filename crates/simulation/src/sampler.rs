//! Per-instant statistics computed from engine snapshots.
//!
//! At every monitor instant the harness turns each device's and queue's
//! cumulative counters into five statistics and adds them to the
//! cross-replication sums at the current monitor index.

use crate::accumulator::{DeviceMetrics, QueueMetrics};
use crate::error::HarnessError;
use multirun_core::Engine;
use multirun_types::{DeviceSnapshot, QueueSnapshot, SimTime};
use tracing::trace;

/// Statistics of one device at one monitor instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSample {
    /// Busy time per completed reservation; zero when nothing completed.
    pub avg_reserve_time: f64,
    /// Busy time as a percentage of elapsed time.
    pub percent_busy: f64,
}

impl DeviceSample {
    /// Compute from cumulative counters. `elapsed` must be non-zero.
    pub fn from_snapshot(snapshot: &DeviceSnapshot, elapsed: SimTime) -> Self {
        let busy = snapshot.busy_time_sum as f64;
        let avg_reserve_time = if snapshot.transact_count > 0 {
            busy / snapshot.transact_count as f64
        } else {
            0.0
        };
        Self {
            avg_reserve_time,
            percent_busy: busy / elapsed as f64 * 100.0,
        }
    }
}

/// Statistics of one queue at one monitor instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueSample {
    /// Length integral over elapsed time.
    pub avg_length: f64,
    /// Wait per served item; zero when nothing was served.
    pub avg_wait_time: f64,
    /// Current length.
    pub length: f64,
}

impl QueueSample {
    /// Compute from cumulative counters. `elapsed` must be non-zero.
    pub fn from_snapshot(snapshot: &QueueSnapshot, elapsed: SimTime) -> Self {
        let avg_wait_time = if snapshot.served > 0 {
            snapshot.wait_time_sum as f64 / snapshot.served as f64
        } else {
            0.0
        };
        Self {
            avg_length: snapshot.length_time_sum as f64 / elapsed as f64,
            avg_wait_time,
            length: snapshot.length as f64,
        }
    }
}

/// Feed one device sample into its running sums.
pub fn update_device(metrics: &mut DeviceMetrics, sample: DeviceSample, index: usize) {
    metrics.avg_reserve_time.accumulate(index, sample.avg_reserve_time);
    metrics.avg_percent_time.accumulate(index, sample.percent_busy);
}

/// Feed one queue sample into its running sums.
pub fn update_queue(metrics: &mut QueueMetrics, sample: QueueSample, index: usize) {
    metrics.avg_length.accumulate(index, sample.avg_length);
    metrics.avg_wait_time.accumulate(index, sample.avg_wait_time);
    metrics.length.accumulate(index, sample.length);
}

/// Sample every device and queue of `engine` at monitor `index`.
///
/// Fails without touching any sums if the engine clock is still at zero
/// or the engine exposes a different set of resources than declared.
pub fn sample_engine<E: Engine + ?Sized>(
    engine: &E,
    devices: &mut [DeviceMetrics],
    queues: &mut [QueueMetrics],
    index: usize,
) -> Result<(), HarnessError> {
    let elapsed = engine.time();
    if elapsed == 0 {
        return Err(HarnessError::SampleAtTimeZero { index });
    }

    let device_snapshots = engine.devices();
    if device_snapshots.len() != devices.len() {
        return Err(HarnessError::ResourceMismatch {
            kind: "device",
            expected: devices.len(),
            actual: device_snapshots.len(),
        });
    }
    let queue_snapshots = engine.queues();
    if queue_snapshots.len() != queues.len() {
        return Err(HarnessError::ResourceMismatch {
            kind: "queue",
            expected: queues.len(),
            actual: queue_snapshots.len(),
        });
    }

    for (metrics, snapshot) in devices.iter_mut().zip(&device_snapshots) {
        update_device(metrics, DeviceSample::from_snapshot(snapshot, elapsed), index);
    }
    for (metrics, snapshot) in queues.iter_mut().zip(&queue_snapshots) {
        update_queue(metrics, QueueSample::from_snapshot(snapshot, elapsed), index);
    }

    trace!(
        index,
        elapsed,
        devices = devices.len(),
        queues = queues.len(),
        "Sampled monitor instant"
    );
    Ok(())
}
