//! Cross-replication running sums.
//!
//! A [`MetricSeries`] holds one running sum per monitor index. It is owned
//! by the harness for the whole run, grows on demand as replications reach
//! new monitor indices, and is only divided by the replication count once
//! every replication has finished.

use serde::{Deserialize, Serialize};

/// Index-addressed running sums for one statistic of one resource.
///
/// Indices beyond the current length implicitly hold zero. Growth only
/// ever appends zeros, so existing sums are never discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    sums: Vec<f64>,
}

impl MetricSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the sum at `index`, zero-filling any gap first.
    ///
    /// Each call adds; callers must contribute at most once per
    /// (replication, monitor index).
    pub fn accumulate(&mut self, index: usize, value: f64) {
        self.ensure_len(index + 1);
        self.sums[index] += value;
    }

    /// Grow to at least `len` entries, filling new slots with zero.
    pub fn ensure_len(&mut self, len: usize) {
        if self.sums.len() < len {
            self.sums.resize(len, 0.0);
        }
    }

    /// Sum at `index`, or zero if nothing has been accumulated there.
    pub fn get(&self, index: usize) -> f64 {
        self.sums.get(index).copied().unwrap_or(0.0)
    }

    /// Number of allocated indices.
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// Whether nothing has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// The raw sums.
    pub fn as_slice(&self) -> &[f64] {
        &self.sums
    }

    /// Every sum divided by the replication count.
    pub fn averaged(&self, replications: usize) -> Vec<f64> {
        let divisor = replications as f64;
        self.sums.iter().map(|sum| sum / divisor).collect()
    }
}

/// Running sums for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    /// Average reservation (busy) duration.
    pub avg_reserve_time: MetricSeries,
    /// Percentage of elapsed time the device was busy.
    pub avg_percent_time: MetricSeries,
}

/// Running sums for one queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueMetrics {
    /// Time-weighted average length.
    pub avg_length: MetricSeries,
    /// Average wait of served items.
    pub avg_wait_time: MetricSeries,
    /// Instantaneous length at the monitor instant.
    pub length: MetricSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_adds_in_place() {
        let mut series = MetricSeries::new();
        series.accumulate(0, 1.5);
        series.accumulate(0, 2.5);
        assert_eq!(series.as_slice(), &[4.0]);
    }

    #[test]
    fn test_accumulate_beyond_len_zero_fills_and_preserves() {
        let mut series = MetricSeries::new();
        series.accumulate(1, 3.0);
        series.accumulate(4, 7.0);
        assert_eq!(series.as_slice(), &[0.0, 3.0, 0.0, 0.0, 7.0]);

        // Filling a gap later keeps the rest intact.
        series.accumulate(2, 1.0);
        assert_eq!(series.as_slice(), &[0.0, 3.0, 1.0, 0.0, 7.0]);
    }

    #[test]
    fn test_get_beyond_len_is_zero() {
        let series = MetricSeries::new();
        assert_eq!(series.get(10), 0.0);
        assert!(series.is_empty());
    }

    #[test]
    fn test_ensure_len_never_shrinks() {
        let mut series = MetricSeries::new();
        series.accumulate(3, 1.0);
        series.ensure_len(2);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_averaged() {
        let mut series = MetricSeries::new();
        series.accumulate(0, 3.0);
        series.accumulate(1, 6.0);
        assert_eq!(series.averaged(3), vec![1.0, 2.0]);
    }
}
