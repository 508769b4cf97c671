//! Content delivery bridge library.

pub mod config;
pub mod delivery;
pub mod host;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod plugin;

pub use config::{ClientConfig, ValidationError};
pub use delivery::{Data, DataProvider, DeliveryService};
pub use host::Console;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
