//! Static event routing for systems
//!
//! A system builds its table once at construction with plain `on` calls; the
//! host then feeds it named events carrying JSON payloads.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::Result;

/// Event handler. Handlers may write back into the payload (e.g. `cancel`).
pub type Handler<S> = fn(&mut S, &mut Value) -> Result<()>;

/// Map from event name to handler
pub struct EventTable<S> {
    handlers: HashMap<&'static str, Handler<S>>,
}

impl<S> EventTable<S> {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Register `handler` for `event`, replacing any previous handler
    pub fn on(&mut self, event: &'static str, handler: Handler<S>) -> &mut Self {
        if self.handlers.insert(event, handler).is_some() {
            log::warn!("Handler for {} registered twice, keeping the latest", event);
        }
        self
    }

    pub fn handler(&self, event: &str) -> Option<Handler<S>> {
        self.handlers.get(event).copied()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route `event` to `target`'s handler. Returns `false` if nothing handles it.
    pub fn dispatch(&self, target: &mut S, event: &str, payload: &mut Value) -> Result<bool> {
        match self.handler(event) {
            Some(handler) => {
                handler(target, payload)?;
                Ok(true)
            }
            None => {
                log::trace!("No handler for {}", event);
                Ok(false)
            }
        }
    }

    /// Registered event names, sorted
    pub fn events(&self) -> Vec<&'static str> {
        let mut events: Vec<_> = self.handlers.keys().copied().collect();
        events.sort_unstable();
        events
    }
}

impl<S> Default for EventTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
