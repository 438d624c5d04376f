//! Inventory simulator CLI.
//!
//! # Example
//!
//! ```bash
//! # 20 replications with a fixed seed, CSV output with comma decimals
//! multirun-sim --seed 456987 --report report.txt --csv harness.csv --costs costs.csv
//!
//! # Quick study with a random seed
//! multirun-sim -r 5 --months 60
//! ```

use clap::Parser;
use multirun_simulation::{CsvFormat, Sinks};
use multirun_simulator::{InventoryConfig, Simulator, SimulatorConfig, SimulatorError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Multi-replication inventory simulator
///
/// Runs independent replications of an (s, S) inventory model and reports
/// the averaged monthly cost together with its Welch moving average.
#[derive(Parser, Debug)]
#[command(name = "multirun-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of replications
    #[arg(short = 'r', long, default_value = "20")]
    replications: usize,

    /// Base random seed. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Half-width of the Welch moving average
    #[arg(short = 'w', long, default_value = "5")]
    window: usize,

    /// Length of each replication in months
    #[arg(short = 'm', long, default_value = "120")]
    months: u64,

    /// Reorder point
    #[arg(long, default_value = "10")]
    reorder_level: i64,

    /// Order-up-to level
    #[arg(long, default_value = "50")]
    max_stock: i64,

    /// Write per-replication engine reports and averaged tables here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write averaged harness tables as CSV here
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write per-replication and smoothed cost rows as CSV here
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Write the full study as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,multirun_simulator=info,multirun_simulation=info")
        }))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Study failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimulatorError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let inventory = InventoryConfig::default()
        .with_months(args.months)
        .with_policy(args.reorder_level, args.max_stock);
    let config = SimulatorConfig::new(args.replications)
        .with_seed(seed)
        .with_welch_window(args.window)
        .with_inventory(inventory);

    let mut report_out = args.report.as_deref().map(create).transpose()?;
    let mut csv_out = args.csv.as_deref().map(create).transpose()?;

    let mut sinks = Sinks::none();
    if let Some(out) = report_out.as_mut() {
        sinks = sinks.with_report(out);
    }
    if let Some(out) = csv_out.as_mut() {
        sinks = sinks.with_csv(out);
    }

    let simulator = Simulator::new(config);
    let report = simulator.run(sinks)?;

    for out in [report_out.as_mut(), csv_out.as_mut()].into_iter().flatten() {
        out.flush()?;
    }

    if let Some(path) = &args.costs {
        let mut out = create(path)?;
        out.write_all(report.costs_csv(&CsvFormat::default()).as_bytes())?;
        out.flush()?;
        info!(path = %path.display(), "Wrote cost rows");
    }

    if let Some(path) = &args.json {
        let mut out = create(path)?;
        serde_json::to_writer_pretty(&mut out, &report)?;
        out.flush()?;
        info!(path = %path.display(), "Wrote JSON report");
    }

    report.print_summary(simulator.config().inventory.scale);
    Ok(())
}

fn create(path: &Path) -> std::io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}
