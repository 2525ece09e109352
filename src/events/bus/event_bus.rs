// events/bus/event_bus.rs
//
// Synchronous typed event bus.
//
// RULES:
// - Handlers run immediately, in subscription order, on the emitting thread
// - A panicking handler is isolated; the rest still run
// - Every emission lands in the event log
// - No async, no queues, no magic

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, error};

use crate::events::types::DomainEvent;

/// Type-erased handler; the subscribe wrapper downcasts back to the
/// concrete event type before calling through
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Central coordination point for domain events.
///
/// Services emit events and register handlers here instead of holding
/// references to one another. Emission is synchronous: `emit` returns
/// once every registered handler has run.
///
/// The bus holds no shared handles itself; callers wrap it in an `Arc`.
pub struct EventBus {
    handlers: RwLock<HashMap<TypeId, Vec<EventHandler>>>,
    event_log: RwLock<Vec<EventLogEntry>>,
}

/// One emission, as recorded in the bus log
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            event_log: RwLock::new(Vec::new()),
        }
    }

    /// Register a handler for one event type.
    ///
    /// Handlers for the same type run in registration order.
    ///
    /// ```ignore
    /// bus.subscribe::<FavoriteAdded, _>(|event| {
    ///     println!("Favorited: {}", event.title);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Emit an event: log it, then run every handler registered for its
    /// type, in order. A handler panic is caught and logged so the
    /// remaining handlers still run.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map_or(0, |h| h.len());

        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };

        debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            entry.event_type, entry.event_id, entry.handler_count
        );
        self.event_log.write().unwrap().push(entry);

        if let Some(event_handlers) = event_handlers {
            for (idx, handler) in event_handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if let Err(e) = result {
                    error!(
                        "Handler {} for {} panicked: {:?}",
                        idx,
                        event.event_type(),
                        e
                    );
                }
            }
        }
    }

    /// Copy of the emission log
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log.read().unwrap().clone()
    }

    /// Drop all recorded emissions
    pub fn clear_event_log(&self) {
        self.event_log.write().unwrap().clear();
    }

    /// Number of handlers registered for an event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let handlers = self.handlers.read().unwrap();
        handlers.get(&TypeId::of::<E>()).map_or(0, |h| h.len())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
