//! Host console the client component plugs into.
//!
//! # Responsibilities
//! - Hold data providers by name (pull path)
//! - Hold event listeners by event name (push path)
//! - Record frontend bundle entries per component
//!
//! # Design Decisions
//! - Components are composed in through [`DataProvider`](crate::delivery::DataProvider),
//!   they never extend console types
//! - All tables are concurrent maps so transport tasks read them while a
//!   reload swaps a component

pub mod events;
pub mod registry;

use dashmap::DashMap;
use serde::Serialize;

pub use events::{EventBus, Listener};
pub use registry::ServiceRegistry;

/// Frontend bundle paths for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub dev: String,
    pub prod: String,
}

/// Services, events, and entries of a running bridge.
#[derive(Default)]
pub struct Console {
    pub services: ServiceRegistry,
    pub events: EventBus,
    entries: DashMap<String, Entry>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&self, entry: Entry) {
        tracing::info!(name = %entry.name, dev = %entry.dev, prod = %entry.prod, "Frontend entry registered");
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn remove_entry(&self, name: &str) -> Option<Entry> {
        self.entries.remove(name).map(|(_, entry)| entry)
    }

    /// Registered entries, sorted by name.
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries() {
        let console = Console::new();
        console.add_entry(Entry { name: "b".into(), dev: "b.ts".into(), prod: "dist/b".into() });
        console.add_entry(Entry { name: "a".into(), dev: "a.ts".into(), prod: "dist/a".into() });

        let names: Vec<_> = console.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert!(console.remove_entry("a").is_some());
        assert_eq!(console.entries().len(), 1);
    }
}
