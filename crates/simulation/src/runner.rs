//! Replication orchestrator.
//!
//! Runs N independent replications one after another. Each replication
//! gets a fresh engine, registers the model's resources, arms the start
//! and monitor events, and then pulls events until the end event fires.
//! Monitor instants feed the shared running sums; once every replication
//! is done the sums are averaged and rendered.

use crate::accumulator::{DeviceMetrics, QueueMetrics};
use crate::config::RunConfig;
use crate::error::HarnessError;
use crate::handlers::HandlerTable;
use crate::render::{CsvFormat, TextFormat};
use crate::report::{write_csv_report, write_text_report};
use crate::sampler::sample_engine;
use crate::summary::RunSummary;
use multirun_core::Engine;
use multirun_types::{EventId, ReplicationIndex, ResourceNames, SimTime};
use std::io;
use tracing::{debug, info, trace};

/// Width of the separator line written after each replication's diagnostics.
const SEPARATOR_WIDTH: usize = 80;

/// Optional destinations for the human-readable and CSV reports.
///
/// With a report sink every replication also gets the engine's own
/// `monitor`/`report` diagnostics.
#[derive(Default)]
pub struct Sinks<'a> {
    report: Option<&'a mut dyn io::Write>,
    csv: Option<&'a mut dyn io::Write>,
}

impl<'a> Sinks<'a> {
    /// No output at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Write the human-readable report to `out`.
    pub fn with_report(mut self, out: &'a mut dyn io::Write) -> Self {
        self.report = Some(out);
        self
    }

    /// Write the CSV report to `out`.
    pub fn with_csv(mut self, out: &'a mut dyn io::Write) -> Self {
        self.csv = Some(out);
        self
    }
}

/// Mutable state of one run, shared by every replication.
struct RunState {
    devices: Vec<DeviceMetrics>,
    queues: Vec<QueueMetrics>,
    monitor_times: Vec<SimTime>,
}

/// Drives a model through many replications and averages its statistics.
pub struct MultiRun<S, E> {
    handlers: HandlerTable<S, E>,
    resources: ResourceNames,
    text_format: TextFormat,
    csv_format: CsvFormat,
}

impl<S, E: Engine> MultiRun<S, E> {
    /// Create an orchestrator.
    ///
    /// Fails if the handler table does not cover both reserved events.
    pub fn new(handlers: HandlerTable<S, E>, resources: ResourceNames) -> Result<Self, HarnessError> {
        handlers.validate()?;
        Ok(Self {
            handlers,
            resources,
            text_format: TextFormat::default(),
            csv_format: CsvFormat::default(),
        })
    }

    /// Set the text table format.
    pub fn with_text_format(mut self, format: TextFormat) -> Self {
        self.text_format = format;
        self
    }

    /// Set the CSV format.
    pub fn with_csv_format(mut self, format: CsvFormat) -> Self {
        self.csv_format = format;
        self
    }

    /// Declared resources.
    pub fn resources(&self) -> &ResourceNames {
        &self.resources
    }

    /// Run every replication and return the averaged statistics.
    ///
    /// `engine_factory` is called once per replication with its index and
    /// must return a fresh engine; the engine is dropped before the next
    /// replication starts.
    pub fn run<F>(
        &mut self,
        state: &mut S,
        config: &RunConfig,
        mut engine_factory: F,
        mut sinks: Sinks<'_>,
    ) -> Result<RunSummary, HarnessError>
    where
        F: FnMut(ReplicationIndex) -> E,
    {
        config.validate()?;
        info!(
            replications = config.replications,
            devices = self.resources.devices.len(),
            queues = self.resources.queues.len(),
            monitored = config.monitor.is_some(),
            "Starting multi-replication run"
        );

        let mut run = RunState {
            devices: vec![DeviceMetrics::default(); self.resources.devices.len()],
            queues: vec![QueueMetrics::default(); self.resources.queues.len()],
            monitor_times: Vec::new(),
        };

        for replication in 0..config.replications {
            if let Some(out) = sinks.report.as_deref_mut() {
                writeln!(out)?;
                writeln!(out, "Replication {}", replication + 1)?;
                writeln!(out)?;
            }

            let mut engine = engine_factory(replication);
            self.run_replication(state, config, replication, &mut engine, &mut run)?;

            if let Some(out) = sinks.report.as_deref_mut() {
                engine.monitor(out)?;
                engine.report(out)?;
                writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
            }
        }

        let summary = RunSummary::finalize(
            &self.resources,
            config.replications,
            run.monitor_times,
            &run.devices,
            &run.queues,
        );

        if let Some(out) = sinks.report.as_deref_mut() {
            write_text_report(&summary, out, &self.text_format)?;
        }
        if let Some(out) = sinks.csv.as_deref_mut() {
            write_csv_report(&summary, out, &self.csv_format)?;
        }

        info!(
            replications = summary.replications,
            monitor_instants = summary.monitor_times.len(),
            "Multi-replication run complete"
        );
        Ok(summary)
    }

    /// Run one replication to its end event.
    fn run_replication(
        &mut self,
        state: &mut S,
        config: &RunConfig,
        replication: ReplicationIndex,
        engine: &mut E,
        run: &mut RunState,
    ) -> Result<(), HarnessError> {
        for name in &self.resources.queues {
            engine.create_queue(name);
        }
        for name in &self.resources.devices {
            engine.create_device(name);
        }

        engine.schedule(config.start_event, config.start_time, config.start_transact);
        if let Some(schedule) = &config.monitor {
            engine.schedule(EventId::MONITOR, schedule.delay_for(0), 0);
        }

        let mut events = 0u64;
        loop {
            let event = engine.cause().ok_or(HarnessError::EventQueueExhausted {
                replication,
                time: engine.time(),
            })?;
            events += 1;

            if event.is_monitor() {
                let index = event.transact as usize;
                sample_engine(&*engine, &mut run.devices, &mut run.queues, index)?;

                // The first replication to reach an index defines its timestamp.
                if run.monitor_times.len() <= index {
                    run.monitor_times.push(engine.time());
                }

                let schedule = config
                    .monitor
                    .as_ref()
                    .ok_or(HarnessError::MonitorWithoutSchedule)?;
                let next = event.transact + 1;
                engine.schedule(EventId::MONITOR, schedule.delay_for(next), next);
                trace!(replication, index, time = engine.time(), "Monitor instant");
            }

            self.handlers.dispatch(state, &event, replication, engine)?;

            if event.is_end() {
                break;
            }
        }

        debug!(
            replication,
            events,
            end_time = engine.time(),
            "Replication complete"
        );
        Ok(())
    }
}
