//! Averaged results of a finished run.

use crate::accumulator::{DeviceMetrics, QueueMetrics};
use crate::table::Table;
use multirun_types::{ResourceNames, SimTime};
use serde::{Deserialize, Serialize};

/// Averaged series of one device, indexed by monitor instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSeries {
    /// Device name.
    pub name: String,
    /// Average reservation duration.
    pub avg_reserve_time: Vec<f64>,
    /// Average percentage of time busy.
    pub avg_percent_time: Vec<f64>,
}

/// Averaged series of one queue, indexed by monitor instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSeries {
    /// Queue name.
    pub name: String,
    /// Time-weighted average length.
    pub avg_length: Vec<f64>,
    /// Average wait time.
    pub avg_wait_time: Vec<f64>,
    /// Instantaneous length.
    pub length: Vec<f64>,
}

/// Cross-replication averages of every monitored statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of replications the sums were divided by.
    pub replications: usize,
    /// Elapsed time of each monitor instant, as first reached by any replication.
    pub monitor_times: Vec<SimTime>,
    /// Per-device series, in declaration order.
    pub devices: Vec<DeviceSeries>,
    /// Per-queue series, in declaration order.
    pub queues: Vec<QueueSeries>,
}

impl RunSummary {
    /// Divide every running sum by the replication count.
    pub(crate) fn finalize(
        resources: &ResourceNames,
        replications: usize,
        monitor_times: Vec<SimTime>,
        devices: &[DeviceMetrics],
        queues: &[QueueMetrics],
    ) -> Self {
        let devices = resources
            .devices
            .iter()
            .zip(devices)
            .map(|(name, metrics)| DeviceSeries {
                name: name.clone(),
                avg_reserve_time: metrics.avg_reserve_time.averaged(replications),
                avg_percent_time: metrics.avg_percent_time.averaged(replications),
            })
            .collect();
        let queues = resources
            .queues
            .iter()
            .zip(queues)
            .map(|(name, metrics)| QueueSeries {
                name: name.clone(),
                avg_length: metrics.avg_length.averaged(replications),
                avg_wait_time: metrics.avg_wait_time.averaged(replications),
                length: metrics.length.averaged(replications),
            })
            .collect();
        Self {
            replications,
            monitor_times,
            devices,
            queues,
        }
    }

    /// Look up a device by name.
    pub fn device(&self, name: &str) -> Option<&DeviceSeries> {
        self.devices.iter().find(|d| d.name == name)
    }

    /// Look up a queue by name.
    pub fn queue(&self, name: &str) -> Option<&QueueSeries> {
        self.queues.iter().find(|q| q.name == name)
    }

    /// Monitor times as table x-axis values.
    pub fn x_axis(&self) -> Vec<f64> {
        self.monitor_times.iter().map(|&t| t as f64).collect()
    }

    /// Pair `series` with the monitor times.
    pub fn table(&self, series: &[f64]) -> Table {
        Table::pair(&self.x_axis(), series)
    }
}
