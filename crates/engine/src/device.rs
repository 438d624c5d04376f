//! Single-server devices.

use multirun_types::{DeviceSnapshot, SimTime, Transact};

/// A facility that can be held by at most one transaction at a time.
#[derive(Debug, Clone)]
pub struct Device {
    name: String,
    /// Current holder and the instant it took the device.
    holder: Option<(Transact, SimTime)>,
    /// Busy time of completed reservations.
    busy_time_sum: SimTime,
    /// Completed reservations.
    transact_count: u64,
}

impl Device {
    /// Create an idle device.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holder: None,
            busy_time_sum: 0,
            transact_count: 0,
        }
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the device is currently held.
    pub fn is_busy(&self) -> bool {
        self.holder.is_some()
    }

    /// Current holder, if any.
    pub fn holder(&self) -> Option<Transact> {
        self.holder.map(|(transact, _)| transact)
    }

    /// Take the device for `transact`. Returns `false` if it is already held.
    pub fn reserve(&mut self, transact: Transact, now: SimTime) -> bool {
        if self.holder.is_some() {
            return false;
        }
        self.holder = Some((transact, now));
        true
    }

    /// Free the device, returning the transaction that held it.
    pub fn release(&mut self, now: SimTime) -> Option<Transact> {
        let (transact, since) = self.holder.take()?;
        self.busy_time_sum += now.saturating_sub(since);
        self.transact_count += 1;
        Some(transact)
    }

    /// Counters as of `now`, counting an in-progress reservation up to `now`.
    pub fn snapshot(&self, now: SimTime) -> DeviceSnapshot {
        let ongoing = self
            .holder
            .map(|(_, since)| now.saturating_sub(since))
            .unwrap_or(0);
        DeviceSnapshot {
            busy_time_sum: self.busy_time_sum + ongoing,
            transact_count: self.transact_count,
        }
    }
}
