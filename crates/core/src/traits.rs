//! Core traits for simulation engines.

use multirun_types::{DeviceId, DeviceSnapshot, Event, EventId, QueueId, QueueSnapshot, SimTime, Transact};
use std::io;

/// A single-threaded discrete-event simulation engine.
///
/// One engine instance lives for exactly one replication. The harness
/// creates it, registers the model's resources, and then repeatedly calls
/// [`cause`](Engine::cause) until the termination event comes out.
///
/// - **Synchronous**: no suspension points, `cause` is a blocking pull
/// - **Monotone clock**: `time()` never decreases
/// - **Self-contained**: no state is shared between engine instances
///
/// # Example
///
/// ```ignore
/// let mut engine = SmplEngine::new(seed);
/// let server = engine.create_device("server");
/// engine.schedule(EventId(1), 0, 0);
/// while let Some(event) = engine.cause() {
///     if event.is_end() {
///         break;
///     }
///     // dispatch to model handlers...
/// }
/// ```
pub trait Engine {
    /// Register a queue. Must be called before scheduling begins.
    fn create_queue(&mut self, name: &str) -> QueueId;

    /// Register a device. Must be called before scheduling begins.
    fn create_device(&mut self, name: &str) -> DeviceId;

    /// Schedule `event` to fire `delay` ticks from now carrying `transact`.
    ///
    /// Very large delays saturate rather than wrap, so a model can push an
    /// event effectively to infinity.
    fn schedule(&mut self, event: EventId, delay: SimTime, transact: Transact);

    /// Pop the earliest pending event and advance the clock to its time.
    ///
    /// Returns `None` when nothing is pending.
    fn cause(&mut self) -> Option<Event>;

    /// Current simulated time.
    fn time(&self) -> SimTime;

    /// Counters of every registered device, in registration order.
    fn devices(&self) -> Vec<DeviceSnapshot>;

    /// Counters of every registered queue, in registration order.
    fn queues(&self) -> Vec<QueueSnapshot>;

    /// Write a dump of the pending event set.
    fn monitor(&self, out: &mut dyn io::Write) -> io::Result<()>;

    /// Write a summary of resource utilisation.
    fn report(&self, out: &mut dyn io::Write) -> io::Result<()>;
}
