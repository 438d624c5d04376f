//! Error types for the replication harness.

use multirun_types::{EventId, ReplicationIndex, SimTime};
use std::io;
use thiserror::Error;

/// Boxed error returned by model handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a multi-replication run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// An event was caused that no handler is registered for.
    #[error("No handler registered for {event} (replication {replication})")]
    UnregisteredEvent {
        event: EventId,
        replication: ReplicationIndex,
    },

    /// One of the reserved events has no handler.
    #[error("Reserved {0} has no registered handler")]
    MissingReservedHandler(EventId),

    /// The engine ran dry before the termination event fired.
    #[error("Replication {replication} ran out of events at time {time} before the end event")]
    EventQueueExhausted {
        replication: ReplicationIndex,
        time: SimTime,
    },

    /// A monitor instant fell on elapsed time zero.
    #[error("Cannot sample at elapsed time zero (monitor index {index})")]
    SampleAtTimeZero { index: usize },

    /// The monitor event fired but there is no schedule to re-arm it with.
    #[error("Monitor event caused without a configured monitor schedule")]
    MonitorWithoutSchedule,

    /// The engine exposes a different number of resources than were declared.
    #[error("Engine reports {actual} {kind}s but {expected} were declared")]
    ResourceMismatch {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A run was requested with zero replications.
    #[error("At least one replication is required")]
    NoReplications,

    /// A model handler failed.
    #[error("Handler for {event} failed in replication {replication}: {source}")]
    Handler {
        event: EventId,
        replication: ReplicationIndex,
        source: BoxError,
    },

    /// Writing to a report sink failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}
