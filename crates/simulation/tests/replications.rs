//! End-to-end tests of the replication harness against the reference engine.

use multirun_core::Engine;
use multirun_engine::SmplEngine;
use multirun_simulation::{
    HandlerTable, HarnessError, MonitorSchedule, MultiRun, RunConfig, Sinks,
};
use multirun_types::{DeviceId, EventId, QueueId, ResourceNames};
use std::cell::Cell;
use std::rc::Rc;
use tracing_test::traced_test;

const START: EventId = EventId(1);
const SERVE: EventId = EventId(2);

/// Counts handler invocations across all replications.
#[derive(Default)]
struct Counters {
    monitors: usize,
    ends: usize,
}

fn resources() -> ResourceNames {
    ResourceNames::new().with_device("server").with_queue("line")
}

fn engine(replication: usize) -> SmplEngine {
    SmplEngine::new(42 + replication as u64)
}

/// A model that does nothing but end at `end_time`.
fn idle_model(end_time: u64) -> HandlerTable<Counters, SmplEngine> {
    HandlerTable::new()
        .on(START, move |_, _, _, engine: &mut SmplEngine| {
            engine.schedule(EventId::END, end_time, 0);
            Ok(())
        })
        .on(EventId::MONITOR, |counters: &mut Counters, _, _, _| {
            counters.monitors += 1;
            Ok(())
        })
        .on(EventId::END, |counters: &mut Counters, _, _, _| {
            counters.ends += 1;
            Ok(())
        })
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Nothing is ever used, so every utilisation and length series is zero.
#[traced_test]
#[test]
fn test_idle_model_yields_zero_series() {
    let mut harness = MultiRun::new(idle_model(1_000), resources()).unwrap();
    let config = RunConfig::new(3, START).with_monitor(MonitorSchedule::every(100));
    let mut counters = Counters::default();

    let summary = harness
        .run(&mut counters, &config, engine, Sinks::none())
        .unwrap();

    // The end event at 1000 was scheduled before the monitor re-armed at 900,
    // so it wins the tie and instants run from 100 to 900.
    assert_eq!(
        summary.monitor_times,
        vec![100, 200, 300, 400, 500, 600, 700, 800, 900]
    );
    let server = summary.device("server").unwrap();
    let line = summary.queue("line").unwrap();
    assert_eq!(server.avg_percent_time.len(), 9);
    assert!(server.avg_percent_time.iter().all(|&v| v == 0.0));
    assert!(server.avg_reserve_time.iter().all(|&v| v == 0.0));
    assert!(line.avg_length.iter().all(|&v| v == 0.0));
    assert!(line.length.iter().all(|&v| v == 0.0));
    assert!(line.avg_wait_time.iter().all(|&v| v == 0.0));

    assert_eq!(counters.monitors, 27);
    assert_eq!(counters.ends, 3);
    assert!(logs_contain("Multi-replication run complete"));
}

/// A device held from time zero is busy 100% of the time.
#[test]
fn test_device_held_for_whole_run_is_fully_busy() {
    let handlers = HandlerTable::new()
        .on(START, |_: &mut (), _, _, engine: &mut SmplEngine| {
            engine.reserve(DeviceId(0), 1)?;
            engine.schedule(EventId::END, 1_000, 0);
            Ok(())
        })
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();
    let config = RunConfig::new(1, START).with_monitor(MonitorSchedule::every(250));

    let summary = harness.run(&mut (), &config, engine, Sinks::none()).unwrap();

    assert_eq!(summary.monitor_times, vec![250, 500, 750]);
    let server = summary.device("server").unwrap();
    assert_close(*server.avg_percent_time.last().unwrap(), 100.0);
    // Nothing was released, so there is no completed reservation to average.
    assert!(server.avg_reserve_time.iter().all(|&v| v == 0.0));
}

/// Queue statistics follow the time-weighted formulas.
#[test]
fn test_queue_statistics() {
    let handlers = HandlerTable::new()
        .on(START, |_: &mut (), _, _, engine: &mut SmplEngine| {
            engine.enqueue(QueueId(0), 1)?;
            engine.enqueue(QueueId(0), 2)?;
            engine.schedule(SERVE, 50, 0);
            engine.schedule(EventId::END, 100, 0);
            Ok(())
        })
        .on(SERVE, |_: &mut (), _, _, engine: &mut SmplEngine| {
            engine.dequeue(QueueId(0))?;
            Ok(())
        })
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();
    let config = RunConfig::new(2, START).with_monitor(MonitorSchedule::every(100));

    let summary = harness.run(&mut (), &config, engine, Sinks::none()).unwrap();

    // The first monitor was armed before the start handler ran, so it fires
    // ahead of the end event at the same instant.
    assert_eq!(summary.monitor_times, vec![100]);
    let line = summary.queue("line").unwrap();
    // Length 2 over [0, 50), then 1 over [50, 100].
    assert_close(line.avg_length[0], 1.5);
    assert_close(line.avg_wait_time[0], 50.0);
    assert_close(line.length[0], 1.0);
}

/// Replications reaching fewer instants still divide by the full count.
#[test]
fn test_uneven_replications_average_over_all_runs() {
    let handlers = HandlerTable::new()
        .on(
            START,
            |_: &mut (), _, replication, engine: &mut SmplEngine| {
                engine.reserve(DeviceId(0), 1)?;
                engine.schedule(EventId::END, 300 + 200 * replication as u64, 0);
                Ok(())
            },
        )
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();
    let config = RunConfig::new(2, START).with_monitor(MonitorSchedule::every(100));

    let summary = harness.run(&mut (), &config, engine, Sinks::none()).unwrap();

    assert_eq!(summary.monitor_times, vec![100, 200, 300, 400]);
    let busy = &summary.device("server").unwrap().avg_percent_time;
    assert_close(busy[0], 100.0);
    assert_close(busy[1], 100.0);
    assert_close(busy[2], 50.0);
    assert_close(busy[3], 50.0);
}

/// Timestamps come from the first replication to reach each index.
#[test]
fn test_first_replication_to_reach_an_index_sets_its_time() {
    let handlers = HandlerTable::new()
        .on(
            START,
            |_: &mut (), _, replication, engine: &mut SmplEngine| {
                engine.schedule(EventId::END, 450 + 550 * replication as u64, 0);
                Ok(())
            },
        )
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();

    // Replication 0 samples every 100 ticks, replication 1 every 150.
    let current = Rc::new(Cell::new(0u64));
    let period = Rc::clone(&current);
    let schedule = MonitorSchedule::new(move |_| 100 + 50 * period.get());
    let config = RunConfig::new(2, START).with_monitor(schedule);

    let summary = harness
        .run(
            &mut (),
            &config,
            |replication| {
                current.set(replication as u64);
                engine(replication)
            },
            Sinks::none(),
        )
        .unwrap();

    // Indices 0..=3 keep replication 0's times even though replication 1
    // reached them at 150, 300, 450 and 600. Indices 4 and 5 are reached
    // only by replication 1, at 750 and 900.
    assert_eq!(summary.monitor_times, vec![100, 200, 300, 400, 750, 900]);
    assert_eq!(summary.device("server").unwrap().avg_percent_time.len(), 6);
}

#[test]
fn test_start_time_and_transact_are_honoured() {
    let handlers = HandlerTable::new()
        .on(
            START,
            |seen: &mut Vec<(u64, u64)>, event, _, engine: &mut SmplEngine| {
                seen.push((event.time, event.transact));
                engine.schedule(EventId::END, 1, 0);
                Ok(())
            },
        )
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, ResourceNames::new()).unwrap();
    let config = RunConfig::new(2, START)
        .with_start_time(40)
        .with_start_transact(6);
    let mut seen = Vec::new();

    let summary = harness.run(&mut seen, &config, engine, Sinks::none()).unwrap();

    assert_eq!(seen, vec![(40, 6), (40, 6)]);
    assert!(summary.monitor_times.is_empty());
}

#[test]
fn test_unregistered_event_aborts_run() {
    let handlers = HandlerTable::new()
        .on(START, |_: &mut (), _, _, engine: &mut SmplEngine| {
            engine.schedule(EventId(7), 5, 0);
            engine.schedule(EventId::END, 10, 0);
            Ok(())
        })
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();

    let err = harness
        .run(&mut (), &RunConfig::new(1, START), engine, Sinks::none())
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::UnregisteredEvent {
            event: EventId(7),
            replication: 0
        }
    ));
}

#[test]
fn test_missing_reserved_handler_is_rejected() {
    let handlers = HandlerTable::<(), SmplEngine>::new()
        .ignore(START)
        .ignore(EventId::MONITOR);
    let err = MultiRun::new(handlers, resources()).err().unwrap();
    assert!(matches!(
        err,
        HarnessError::MissingReservedHandler(EventId::END)
    ));
}

#[test]
fn test_run_without_end_event_reports_exhaustion() {
    let handlers = HandlerTable::<(), SmplEngine>::new()
        .ignore(START)
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();

    let err = harness
        .run(&mut (), &RunConfig::new(1, START), engine, Sinks::none())
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::EventQueueExhausted {
            replication: 0,
            time: 0
        }
    ));
}

#[test]
fn test_monitor_at_time_zero_is_rejected() {
    let mut harness = MultiRun::new(idle_model(100), resources()).unwrap();
    let config = RunConfig::new(1, START).with_monitor(MonitorSchedule::every(0));

    let err = harness
        .run(&mut Counters::default(), &config, engine, Sinks::none())
        .unwrap_err();

    assert!(matches!(err, HarnessError::SampleAtTimeZero { index: 0 }));
}

#[test]
fn test_handler_error_propagates() {
    let handlers = HandlerTable::new()
        .on(START, |_: &mut (), _, _, engine: &mut SmplEngine| {
            // Releasing an idle device is a model bug.
            engine.release(DeviceId(0))?;
            Ok(())
        })
        .ignore(EventId::MONITOR)
        .ignore(EventId::END);
    let mut harness = MultiRun::new(handlers, resources()).unwrap();

    let err = harness
        .run(&mut (), &RunConfig::new(1, START), engine, Sinks::none())
        .unwrap_err();

    assert!(matches!(err, HarnessError::Handler { event: START, .. }));
    assert!(err.to_string().contains("released while idle"));
}

#[test]
fn test_reports_are_written_to_sinks() {
    let mut harness = MultiRun::new(idle_model(300), resources()).unwrap();
    let config = RunConfig::new(2, START).with_monitor(MonitorSchedule::every(100));
    let mut report = Vec::new();
    let mut csv = Vec::new();

    harness
        .run(
            &mut Counters::default(),
            &config,
            engine,
            Sinks::none().with_report(&mut report).with_csv(&mut csv),
        )
        .unwrap();

    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("Replication 1"));
    assert!(report.contains("Replication 2"));
    assert!(report.contains("Report at time 300"));
    assert!(report.contains("Averaged snapshots for device server"));
    assert!(report.contains("Averaged snapshots for queue line"));

    let csv = String::from_utf8(csv).unwrap();
    assert!(!csv.contains("Replication"));
    assert!(csv.contains("Average busy percentage:\n100,00000;200,00000;\n0,00000;0,00000;\n"));
}
