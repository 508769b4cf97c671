//! Data service registry.

use std::sync::Arc;

use dashmap::DashMap;

use crate::delivery::DataProvider;

/// Named data providers the transport can pull from.
#[derive(Default)]
pub struct ServiceRegistry {
    services: DashMap<String, Arc<dyn DataProvider>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under its own name. Returns the provider it replaced.
    pub fn register(&self, provider: Arc<dyn DataProvider>) -> Option<Arc<dyn DataProvider>> {
        let name = provider.name().to_string();
        tracing::debug!(service = %name, "Registering data service");
        self.services.insert(name, provider)
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn DataProvider>> {
        self.services.remove(name).map(|(_, provider)| provider)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DataProvider>> {
        self.services.get(name).map(|p| Arc::clone(p.value()))
    }

    pub fn names(&self) -> Vec<String> {
        self.services.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
