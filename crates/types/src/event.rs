//! Caused events.

use crate::{EventId, SimTime, Transact};
use serde::{Deserialize, Serialize};

/// An event popped from an engine's pending set.
///
/// `time` is the simulated instant the event fired at; the engine clock
/// has already been advanced to it when the event is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event kind.
    pub id: EventId,
    /// Payload scheduled alongside the event.
    pub transact: Transact,
    /// Instant the event fired at.
    pub time: SimTime,
}

impl Event {
    /// Create a new event.
    pub fn new(id: EventId, transact: Transact, time: SimTime) -> Self {
        Self { id, transact, time }
    }

    /// Whether this is the reserved monitor event.
    pub fn is_monitor(&self) -> bool {
        self.id == EventId::MONITOR
    }

    /// Whether this is the reserved termination event.
    pub fn is_end(&self) -> bool {
        self.id == EventId::END
    }
}
