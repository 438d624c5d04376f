//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event kind identifier.
///
/// Model-defined ids are small integers. Two ids are reserved by the
/// harness and sit far above anything a model is expected to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// Periodic sampling event driven by the harness.
    pub const MONITOR: Self = EventId(1_000_000_000);

    /// Ends the current replication once caused.
    pub const END: Self = EventId(1_000_000_001);

    /// Whether this id is one of the harness-reserved ids.
    pub fn is_reserved(self) -> bool {
        self == Self::MONITOR || self == Self::END
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MONITOR => write!(f, "Event(monitor)"),
            Self::END => write!(f, "Event(end)"),
            EventId(id) => write!(f, "Event({id})"),
        }
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id)
    }
}

/// Handle of a device registered with an engine, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub usize);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device({})", self.0)
    }
}

/// Handle of a queue registered with an engine, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueId(pub usize);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Queue({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_ids_are_distinct_and_flagged() {
        assert_ne!(EventId::MONITOR, EventId::END);
        assert!(EventId::MONITOR.is_reserved());
        assert!(EventId::END.is_reserved());
        assert!(!EventId(1).is_reserved());
    }

    #[test]
    fn test_display() {
        assert_eq!(EventId(3).to_string(), "Event(3)");
        assert_eq!(EventId::END.to_string(), "Event(end)");
        assert_eq!(QueueId(0).to_string(), "Queue(0)");
    }

    #[test]
    fn test_event_id_serializes_transparently() {
        let json = serde_json::to_string(&EventId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
