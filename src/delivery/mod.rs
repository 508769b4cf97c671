//! Content delivery subsystem.
//!
//! # Data Flow
//! ```text
//! ClientConfig (validated)
//!     → service.rs (DeliveryService, mode fixed at construction)
//!     → pull: DataProvider::get → retrieve()
//!     → push: EventBus "client/data" → on_data_request()
//!     → data.rs (Data payload)
//!     → rendering surface
//! ```

pub mod data;
pub mod provider;
pub mod service;

pub use data::{Data, DataType};
pub use provider::DataProvider;
pub use service::{Channel, DeliveryMode, DeliveryService, DATA_EVENT, SERVICE_NAME};
