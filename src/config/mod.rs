//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs ([plugin] table → ClientConfig)
//!     → LoadedConfig (validated, immutable)
//!     → plugin::apply builds the delivery service from it
//!
//! On file change (watch_config = true):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → plugin::reload swaps in a component built from the new ClientConfig
//! ```
//!
//! # Design Decisions
//! - Client config is immutable once validated; changes replace the component
//! - Host sections default so a file may contain only `[plugin]`
//! - The `[plugin]` table stays untyped until validation so errors name the
//!   offending field

pub mod client;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use client::{ClientConfig, Content, InjectType};
pub use loader::{load_config, parse_config, ConfigError, LoadedConfig};
pub use schema::{BridgeConfig, ConsoleConfig, ObservabilityConfig, ServerConfig};
pub use validation::{validate, ValidationError};
pub use watcher::ConfigWatcher;
