//! Core contract between the replication harness and a simulation engine.
//!
//! The harness never schedules model logic itself. It drives an engine
//! through the [`Engine`] trait: registering resources, scheduling and
//! causing events, and reading resource counters at monitor instants.

mod traits;

pub use traits::Engine;

pub use multirun_types::{
    DeviceId, DeviceSnapshot, Event, EventId, QueueId, QueueSnapshot, ReplicationIndex,
    ResourceNames, SimTime, Transact,
};
