//! Configuration types for a multi-replication run.

use crate::error::HarnessError;
use multirun_types::{EventId, SimTime, Transact};
use std::fmt;

/// Maps a monitor index to the delay before that monitor instant.
///
/// The delay for index 0 is measured from the start of the replication;
/// the delay for index `k + 1` from monitor instant `k`. The mapping must be
/// defined for every index: the harness keeps asking for the next one for
/// as long as the replication runs. Returning a huge delay is the way to
/// stop sampling while still letting the end event finish the run.
pub struct MonitorSchedule {
    delay: Box<dyn Fn(Transact) -> SimTime>,
}

impl MonitorSchedule {
    /// Delay used to push monitoring past any realistic end time.
    pub const NEVER: SimTime = 1_000_000_000;

    /// Build a schedule from an arbitrary total mapping.
    pub fn new(delay: impl Fn(Transact) -> SimTime + 'static) -> Self {
        Self {
            delay: Box::new(delay),
        }
    }

    /// Sample every `period` ticks.
    pub fn every(period: SimTime) -> Self {
        Self::new(move |_| period)
    }

    /// Follow `intervals` for the first indices, then stop sampling.
    pub fn intervals(intervals: Vec<SimTime>) -> Self {
        Self::new(move |index| {
            usize::try_from(index)
                .ok()
                .and_then(|i| intervals.get(i).copied())
                .unwrap_or(Self::NEVER)
        })
    }

    /// Delay before monitor instant `index`.
    pub fn delay_for(&self, index: Transact) -> SimTime {
        (self.delay)(index)
    }
}

impl fmt::Debug for MonitorSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorSchedule")
            .field("first_delay", &self.delay_for(0))
            .finish_non_exhaustive()
    }
}

/// Configuration for a multi-replication run.
#[derive(Debug)]
pub struct RunConfig {
    /// Number of independent replications.
    pub replications: usize,

    /// Model event that starts every replication.
    pub start_event: EventId,

    /// Payload of the start event.
    pub start_transact: Transact,

    /// Simulated time the start event fires at.
    pub start_time: SimTime,

    /// When to sample. Without a schedule no monitor event is armed.
    pub monitor: Option<MonitorSchedule>,
}

impl RunConfig {
    /// Create a configuration starting with `start_event` at time zero.
    pub fn new(replications: usize, start_event: EventId) -> Self {
        Self {
            replications,
            start_event,
            start_transact: 0,
            start_time: 0,
            monitor: None,
        }
    }

    /// Set the payload of the start event.
    pub fn with_start_transact(mut self, transact: Transact) -> Self {
        self.start_transact = transact;
        self
    }

    /// Set the time the start event fires at.
    pub fn with_start_time(mut self, time: SimTime) -> Self {
        self.start_time = time;
        self
    }

    /// Set the monitor schedule.
    pub fn with_monitor(mut self, schedule: MonitorSchedule) -> Self {
        self.monitor = Some(schedule);
        self
    }

    /// Check the configuration before running.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.replications == 0 {
            return Err(HarnessError::NoReplications);
        }
        Ok(())
    }
}
