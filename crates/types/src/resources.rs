//! Named resources a model declares up front.

use serde::{Deserialize, Serialize};

/// Names of the queues and devices a model uses.
///
/// A fresh engine is created for every replication and the resources are
/// registered in this order, so `QueueId(i)` always refers to `queues[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNames {
    /// Device names, in registration order.
    pub devices: Vec<String>,
    /// Queue names, in registration order.
    pub queues: Vec<String>,
}

impl ResourceNames {
    /// Create an empty set of resource names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device name.
    pub fn with_device(mut self, name: impl Into<String>) -> Self {
        self.devices.push(name.into());
        self
    }

    /// Add a queue name.
    pub fn with_queue(mut self, name: impl Into<String>) -> Self {
        self.queues.push(name.into());
        self
    }
}
