//! The reference engine.

use crate::device::Device;
use crate::error::EngineError;
use crate::event_queue::{EventKey, PendingEvent};
use crate::queue::Queue;
use multirun_core::Engine;
use multirun_types::{
    DeviceId, DeviceSnapshot, Event, EventId, QueueId, QueueSnapshot, SimTime, Transact,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::io;
use tracing::trace;

/// Counters describing engine activity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Events handed to `schedule`.
    pub events_scheduled: u64,
    /// Events returned by `cause`.
    pub events_caused: u64,
}

/// SMPL-style discrete-event engine.
///
/// Pending events live in a `BTreeMap` keyed by (time, sequence), so the
/// earliest event always comes out first and ties fire in scheduling order.
/// Random variates come from a `ChaCha8Rng`; the same seed reproduces the
/// same replication.
pub struct SmplEngine {
    /// Current simulation time.
    now: SimTime,

    /// Pending events, ordered deterministically.
    pending: BTreeMap<EventKey, PendingEvent>,

    /// Sequence counter for deterministic ordering.
    sequence: u64,

    /// Registered devices, indexed by `DeviceId`.
    devices: Vec<Device>,

    /// Registered queues, indexed by `QueueId`.
    queues: Vec<Queue>,

    rng: ChaCha8Rng,

    stats: EngineStats,
}

impl SmplEngine {
    /// Create an engine at time zero with a seeded random stream.
    pub fn new(seed: u64) -> Self {
        Self {
            now: 0,
            pending: BTreeMap::new(),
            sequence: 0,
            devices: Vec::new(),
            queues: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: EngineStats::default(),
        }
    }

    /// Activity counters.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Number of events still pending.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Look up a device.
    pub fn device(&self, id: DeviceId) -> Result<&Device, EngineError> {
        self.devices.get(id.0).ok_or(EngineError::UnknownDevice(id))
    }

    /// Look up a queue.
    pub fn queue(&self, id: QueueId) -> Result<&Queue, EngineError> {
        self.queues.get(id.0).ok_or(EngineError::UnknownQueue(id))
    }

    /// Take `device` for `transact`. Returns `false` if the device is busy.
    pub fn reserve(&mut self, id: DeviceId, transact: Transact) -> Result<bool, EngineError> {
        let now = self.now;
        let device = self
            .devices
            .get_mut(id.0)
            .ok_or(EngineError::UnknownDevice(id))?;
        Ok(device.reserve(transact, now))
    }

    /// Free `device`, returning the transaction that held it.
    pub fn release(&mut self, id: DeviceId) -> Result<Transact, EngineError> {
        let now = self.now;
        let device = self
            .devices
            .get_mut(id.0)
            .ok_or(EngineError::UnknownDevice(id))?;
        device.release(now).ok_or(EngineError::DeviceIdle(id))
    }

    /// Append `transact` to `queue`.
    pub fn enqueue(&mut self, id: QueueId, transact: Transact) -> Result<(), EngineError> {
        let now = self.now;
        let queue = self
            .queues
            .get_mut(id.0)
            .ok_or(EngineError::UnknownQueue(id))?;
        queue.enqueue(transact, now);
        Ok(())
    }

    /// Remove the oldest transaction from `queue`, if any.
    pub fn dequeue(&mut self, id: QueueId) -> Result<Option<Transact>, EngineError> {
        let now = self.now;
        let queue = self
            .queues
            .get_mut(id.0)
            .ok_or(EngineError::UnknownQueue(id))?;
        Ok(queue.dequeue(now))
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Negative-exponential delay with the given mean, truncated to ticks.
    pub fn neg_exp(&mut self, mean: f64) -> SimTime {
        let u = self.uniform();
        (-mean * (1.0 - u).ln()) as SimTime
    }

    /// Uniform integer in `[low, high]`.
    pub fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

impl Engine for SmplEngine {
    fn create_queue(&mut self, name: &str) -> QueueId {
        self.queues.push(Queue::new(name));
        QueueId(self.queues.len() - 1)
    }

    fn create_device(&mut self, name: &str) -> DeviceId {
        self.devices.push(Device::new(name));
        DeviceId(self.devices.len() - 1)
    }

    fn schedule(&mut self, event: EventId, delay: SimTime, transact: Transact) {
        self.sequence += 1;
        let key = EventKey {
            time: self.now.saturating_add(delay),
            sequence: self.sequence,
        };
        trace!(%event, fire_at = key.time, transact, "Scheduling event");
        self.pending.insert(
            key,
            PendingEvent {
                id: event,
                transact,
            },
        );
        self.stats.events_scheduled += 1;
    }

    fn cause(&mut self) -> Option<Event> {
        let (key, pending) = self.pending.pop_first()?;
        self.now = key.time;
        self.stats.events_caused += 1;
        Some(Event::new(pending.id, pending.transact, key.time))
    }

    fn time(&self) -> SimTime {
        self.now
    }

    fn devices(&self) -> Vec<DeviceSnapshot> {
        self.devices.iter().map(|d| d.snapshot(self.now)).collect()
    }

    fn queues(&self) -> Vec<QueueSnapshot> {
        self.queues.iter().map(|q| q.snapshot(self.now)).collect()
    }

    fn monitor(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "Time: {}", self.now)?;
        writeln!(out, "Pending events: {}", self.pending.len())?;
        for (key, pending) in &self.pending {
            writeln!(
                out,
                "  at {:>12}  {:<20}  transact {}",
                key.time,
                pending.id.to_string(),
                pending.transact
            )?;
        }
        for device in &self.devices {
            match device.holder() {
                Some(transact) => {
                    writeln!(out, "Device {}: held by {}", device.name(), transact)?
                }
                None => writeln!(out, "Device {}: idle", device.name())?,
            }
        }
        for queue in &self.queues {
            writeln!(out, "Queue {}: {} waiting", queue.name(), queue.len())?;
        }
        Ok(())
    }

    fn report(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "Report at time {}", self.now)?;
        if !self.devices.is_empty() {
            writeln!(
                out,
                "{:<16} {:>10} {:>10} {:>12}",
                "device", "busy %", "served", "mean busy"
            )?;
            for device in &self.devices {
                let snapshot = device.snapshot(self.now);
                let busy = if self.now > 0 {
                    snapshot.busy_time_sum as f64 / self.now as f64 * 100.0
                } else {
                    0.0
                };
                let mean = if snapshot.transact_count > 0 {
                    snapshot.busy_time_sum as f64 / snapshot.transact_count as f64
                } else {
                    0.0
                };
                writeln!(
                    out,
                    "{:<16} {:>10.3} {:>10} {:>12.3}",
                    device.name(),
                    busy,
                    snapshot.transact_count,
                    mean
                )?;
            }
        }
        if !self.queues.is_empty() {
            writeln!(
                out,
                "{:<16} {:>10} {:>10} {:>10} {:>6} {:>6}",
                "queue", "avg len", "avg wait", "served", "max", "now"
            )?;
            for queue in &self.queues {
                let snapshot = queue.snapshot(self.now);
                let avg_len = if self.now > 0 {
                    snapshot.length_time_sum as f64 / self.now as f64
                } else {
                    0.0
                };
                let avg_wait = if snapshot.served > 0 {
                    snapshot.wait_time_sum as f64 / snapshot.served as f64
                } else {
                    0.0
                };
                writeln!(
                    out,
                    "{:<16} {:>10.3} {:>10.3} {:>10} {:>6} {:>6}",
                    queue.name(),
                    avg_len,
                    avg_wait,
                    snapshot.served,
                    queue.max_length(),
                    snapshot.length
                )?;
            }
        }
        Ok(())
    }
}
