//! Event-id to handler dispatch.

use crate::error::{BoxError, HarnessError};
use indexmap::IndexMap;
use multirun_types::{Event, EventId, ReplicationIndex};

/// Outcome of a model handler.
pub type HandlerResult = Result<(), BoxError>;

/// A model handler.
///
/// Receives the model state `S`, the caused event, the replication index
/// and the engine that caused the event.
pub type Handler<S, E> = Box<dyn FnMut(&mut S, &Event, ReplicationIndex, &mut E) -> HandlerResult>;

/// Mapping from event id to the handler that reacts to it.
///
/// Every id a model can schedule needs an entry, including the reserved
/// [`EventId::MONITOR`] and [`EventId::END`] (a no-op is fine). Dispatching
/// an id with no entry is an error, never a silent skip.
pub struct HandlerTable<S, E> {
    handlers: IndexMap<EventId, Handler<S, E>>,
}

impl<S, E> HandlerTable<S, E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }

    /// Register `handler` for `event`, replacing any previous one.
    pub fn on<F>(mut self, event: EventId, handler: F) -> Self
    where
        F: FnMut(&mut S, &Event, ReplicationIndex, &mut E) -> HandlerResult + 'static,
    {
        self.insert(event, handler);
        self
    }

    /// Register `handler` for `event`, replacing any previous one.
    pub fn insert<F>(&mut self, event: EventId, handler: F)
    where
        F: FnMut(&mut S, &Event, ReplicationIndex, &mut E) -> HandlerResult + 'static,
    {
        self.handlers.insert(event, Box::new(handler));
    }

    /// Register a handler that does nothing.
    pub fn ignore(self, event: EventId) -> Self {
        self.on(event, |_, _, _, _| Ok(()))
    }

    /// Whether `event` has a handler.
    pub fn contains(&self, event: EventId) -> bool {
        self.handlers.contains_key(&event)
    }

    /// Registered ids, in registration order.
    pub fn event_ids(&self) -> impl Iterator<Item = EventId> + '_ {
        self.handlers.keys().copied()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Check that both reserved events are covered.
    pub fn validate(&self) -> Result<(), HarnessError> {
        for reserved in [EventId::MONITOR, EventId::END] {
            if !self.contains(reserved) {
                return Err(HarnessError::MissingReservedHandler(reserved));
            }
        }
        Ok(())
    }

    /// Run the handler registered for `event.id`.
    pub fn dispatch(
        &mut self,
        state: &mut S,
        event: &Event,
        replication: ReplicationIndex,
        engine: &mut E,
    ) -> Result<(), HarnessError> {
        let handler =
            self.handlers
                .get_mut(&event.id)
                .ok_or(HarnessError::UnregisteredEvent {
                    event: event.id,
                    replication,
                })?;
        handler(state, event, replication, engine).map_err(|source| HarnessError::Handler {
            event: event.id,
            replication,
            source,
        })
    }
}

impl<S, E> Default for HandlerTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
