//! Cost metrics of a finished inventory study.

use crate::inventory::ReplicationOutcome;
use multirun_simulation::{
    csv_rows, render_text, welch, CsvFormat, MetricSeries, RunSummary, Table, TextFormat,
};
use serde::{Deserialize, Serialize};

/// Everything a study produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReport {
    /// Base seed the replications were derived from.
    pub seed: u64,
    /// Harness statistics of the `orders` queue.
    pub harness: RunSummary,
    /// Monthly cost per replication, indexed by monitor instant.
    pub costs: Vec<Vec<f64>>,
    /// Cross-replication mean of `costs`.
    pub average_cost: Vec<f64>,
    /// Half-width used for `smoothed_cost`.
    pub welch_window: usize,
    /// Welch moving average of `average_cost`.
    pub smoothed_cost: Vec<f64>,
    /// Per-replication end-of-run figures.
    pub outcomes: Vec<ReplicationOutcome>,
    /// Mean of `outcomes`.
    pub mean_outcome: Option<ReplicationOutcome>,
}

impl InventoryReport {
    /// Average `costs` over `harness.replications` and smooth the result
    /// with half-width `welch_window`.
    pub fn new(
        seed: u64,
        harness: RunSummary,
        costs: Vec<Vec<f64>>,
        outcomes: Vec<ReplicationOutcome>,
        welch_window: usize,
    ) -> Self {
        let mut sums = MetricSeries::new();
        for series in &costs {
            for (index, &cost) in series.iter().enumerate() {
                sums.accumulate(index, cost);
            }
        }
        sums.ensure_len(harness.monitor_times.len());
        // Replications that stopped early contribute zero to later instants.
        let average_cost = sums.averaged(harness.replications);
        let smoothed_cost = welch(&average_cost, welch_window);
        let mean_outcome = ReplicationOutcome::mean(&outcomes);

        Self {
            seed,
            harness,
            costs,
            average_cost,
            welch_window,
            smoothed_cost,
            outcomes,
            mean_outcome,
        }
    }

    /// Average cost against monitor time, in months.
    ///
    /// Only instants some replication reached are plotted; padded columns
    /// have no monitor time.
    pub fn average_cost_table(&self, scale: u64) -> Table {
        self.against_months(scale, &self.average_cost)
    }

    /// Smoothed cost against monitor time, in months.
    pub fn smoothed_cost_table(&self, scale: u64) -> Table {
        self.against_months(scale, &self.smoothed_cost)
    }

    /// Per-replication cost rows, three empty lines, then the smoothed row.
    pub fn costs_csv(&self, format: &CsvFormat) -> String {
        let mut out = csv_rows(&self.costs, format);
        out.push_str("\n\n\n");
        out.push_str(&csv_rows(std::slice::from_ref(&self.smoothed_cost), format));
        out
    }

    /// Print a short human-readable summary to stdout.
    pub fn print_summary(&self, scale: u64) {
        println!("\nInventory Study");
        println!("===============\n");
        println!("  Replications: {}", self.harness.replications);
        println!("  Base seed: {}", self.seed);
        println!("  Monitor instants: {}", self.harness.monitor_times.len());
        println!();

        if let Some(outcome) = &self.mean_outcome {
            println!("Mean outcome per replication:");
            println!("  Ordering cost per month: {:.3}", outcome.ordering_cost_per_month);
            println!("  Final stock: {:.3}", outcome.final_stock);
            println!("  Average holding: {:.3}", outcome.avg_holding);
            println!("  Average shortage: {:.3}", outcome.avg_shortage);
            println!("  Total cost per month: {:.3}", outcome.total_cost_per_month);
            println!();
        }

        let format = TextFormat::default();
        println!("Average monthly cost:");
        print!("{}", render_text(&self.average_cost_table(scale), &format));
        println!();
        println!("Welch-smoothed cost (w = {}):", self.welch_window);
        print!("{}", render_text(&self.smoothed_cost_table(scale), &format));
    }

    fn against_months(&self, scale: u64, values: &[f64]) -> Table {
        let months = self.months(scale);
        let len = months.len().min(values.len());
        Table::pair(&months[..len], &values[..len])
    }

    fn months(&self, scale: u64) -> Vec<f64> {
        let scale = scale.max(1) as f64;
        self.harness
            .monitor_times
            .iter()
            .map(|&t| t as f64 / scale)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(replications: usize, monitor_times: Vec<u64>) -> RunSummary {
        RunSummary {
            replications,
            monitor_times,
            devices: Vec::new(),
            queues: Vec::new(),
        }
    }

    #[test]
    fn test_average_divides_by_all_replications() {
        let report = InventoryReport::new(
            1,
            summary(2, vec![100, 200]),
            vec![vec![10.0, 20.0], vec![30.0]],
            Vec::new(),
            0,
        );
        assert_eq!(report.average_cost, vec![20.0, 10.0]);
        assert_eq!(report.smoothed_cost, report.average_cost);
        assert!(report.mean_outcome.is_none());
    }

    #[test]
    fn test_costs_csv_layout() {
        let report = InventoryReport::new(
            1,
            summary(1, vec![100, 200]),
            vec![vec![1.0, 2.0]],
            Vec::new(),
            0,
        );
        let csv = report.costs_csv(&CsvFormat::point_decimal().with_precision(1));
        assert_eq!(csv, "1.0,2.0,\n\n\n\n1.0,2.0,\n");
    }

    #[test]
    fn test_tables_skip_unreached_columns() {
        let report = InventoryReport::new(
            1,
            summary(1, vec![100, 200]),
            vec![vec![1.0, 2.0, 0.0]],
            Vec::new(),
            0,
        );
        assert_eq!(report.average_cost.len(), 3);
        let table = report.average_cost_table(100);
        assert_eq!(table.xs(), Some(&[1.0, 2.0][..]));
        assert_eq!(table.ys(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_tables_use_months() {
        let report = InventoryReport::new(
            1,
            summary(1, vec![100, 300, 600]),
            vec![vec![1.0, 2.0, 3.0]],
            Vec::new(),
            1,
        );
        let table = report.average_cost_table(100);
        assert_eq!(table.xs(), Some(&[1.0, 3.0, 6.0][..]));
        assert_eq!(report.smoothed_cost_table(100).ys().map(<[f64]>::len), Some(2));
    }
}
