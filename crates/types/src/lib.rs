//! Shared vocabulary for multi-replication discrete-event simulation.
//!
//! These types are used by the engine contract (`multirun-core`), the
//! reference engine (`multirun-engine`) and the replication harness
//! (`multirun-simulation`). They carry no behaviour beyond small helpers.

mod event;
mod identifiers;
mod resources;
mod snapshot;

pub use event::Event;
pub use identifiers::{DeviceId, EventId, QueueId};
pub use resources::ResourceNames;
pub use snapshot::{DeviceSnapshot, QueueSnapshot};

/// Simulated time, in integral ticks since the start of a replication.
pub type SimTime = u64;

/// Integer payload carried by an event (a transaction number, a quantity,
/// or the monitor index for the reserved monitor event).
pub type Transact = u64;

/// 0-based index of a replication within a multi-replication run.
pub type ReplicationIndex = usize;
