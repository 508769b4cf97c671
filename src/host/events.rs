//! Named push events.

use std::sync::Arc;

use dashmap::DashMap;

use crate::delivery::Data;

/// Zero-argument event handler producing a payload.
pub type Listener = Arc<dyn Fn() -> Data + Send + Sync>;

/// Event bus mapping an event name to its single listener.
#[derive(Default)]
pub struct EventBus {
    listeners: DashMap<String, Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`, replacing any previous one.
    pub fn add_listener<F>(&self, event: &str, listener: F)
    where
        F: Fn() -> Data + Send + Sync + 'static,
    {
        if self.listeners.insert(event.to_string(), Arc::new(listener)).is_some() {
            tracing::debug!(event, "Replaced existing event listener");
        }
    }

    /// Returns `true` if a listener was removed.
    pub fn remove_listener(&self, event: &str) -> bool {
        self.listeners.remove(event).is_some()
    }

    pub fn has_listener(&self, event: &str) -> bool {
        self.listeners.contains_key(event)
    }

    /// Run the listener for `event`, if any.
    pub fn emit(&self, event: &str) -> Option<Data> {
        // Clone out of the map so the shard lock is not held while the handler runs.
        let listener = self.listeners.get(event).map(|l| Arc::clone(l.value()))?;
        Some(listener())
    }

    pub fn events(&self) -> Vec<String> {
        self.listeners.iter().map(|e| e.key().clone()).collect()
    }
}
