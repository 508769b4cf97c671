//! Wiring of the client component into a console.
//!
//! `apply` is the single startup call: register the frontend entry, the data
//! service, and the push listener. `dispose` undoes all of it. A reload builds
//! a fresh component and swaps it over the old one table by table, so the
//! service name and the push event stay resolvable throughout; a running
//! component is never mutated.

use std::sync::Arc;

use crate::config::{ClientConfig, ConsoleConfig};
use crate::delivery::{DataProvider, DeliveryService, SERVICE_NAME};
use crate::host::{Console, Entry};

/// Build the delivery service for `config` and register it with `console`.
pub fn apply(console: &Console, config: ClientConfig, entry: &ConsoleConfig) -> Arc<DeliveryService> {
    console.add_entry(Entry {
        name: SERVICE_NAME.to_string(),
        dev: entry.dev.clone(),
        prod: entry.prod.clone(),
    });

    let service = Arc::new(DeliveryService::new(config));
    console.services.register(service.clone());
    Arc::clone(&service).register_events(&console.events);

    tracing::info!(
        self_id = %service.config().self_id,
        inject_type = %service.config().inject_type(),
        mode = ?service.mode(),
        "Client component applied"
    );
    service
}

/// Remove the client component from `console`. Returns `false` if none was applied.
pub fn dispose(console: &Console) -> bool {
    let Some(provider) = console.services.unregister(SERVICE_NAME) else {
        return false;
    };
    provider.unregister_events(&console.events);
    console.remove_entry(SERVICE_NAME);
    tracing::info!("Client component disposed");
    true
}

/// Replace the running component with one built from `config`.
///
/// Every registration overwrites its predecessor in place, so nothing is
/// removed first.
pub fn reload(console: &Console, config: ClientConfig, entry: &ConsoleConfig) -> Arc<DeliveryService> {
    let replacing = console.services.get(SERVICE_NAME).is_some();
    let service = apply(console, config, entry);
    if replacing {
        tracing::info!(self_id = %service.config().self_id, "Client component replaced");
    }
    service
}
