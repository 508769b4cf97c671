//! Capability interface between a data source and the host console.

use std::sync::Arc;

use async_trait::async_trait;

use crate::delivery::data::Data;
use crate::host::EventBus;

/// Something the console can pull data from and that may arm push events.
///
/// The console's service registry holds `Arc<dyn DataProvider>`; providers
/// never depend on console internals beyond the [`EventBus`] they are handed.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Registry key the provider is served under.
    fn name(&self) -> &str;

    /// Pull path. Must not fail; a disabled channel answers with the
    /// suppressed payload.
    async fn get(&self) -> Data;

    /// Arm push listeners on `bus`. Called once when the provider is applied.
    fn register_events(self: Arc<Self>, bus: &EventBus);

    /// Remove every listener `register_events` added.
    fn unregister_events(&self, bus: &EventBus);
}
