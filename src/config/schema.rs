//! Configuration file schema.
//!
//! The file has fixed host sections (`[server]`, `[observability]`,
//! `[console]`) and one untyped `[plugin]` table that is handed to the
//! client config validator as-is.

use serde::{Deserialize, Serialize};

/// Root of the bridge configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// HTTP/WebSocket listener settings.
    pub server: ServerConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Frontend bundle paths registered with the console.
    pub console: ConsoleConfig,

    /// Raw client component config, validated separately.
    pub plugin: serde_json::Value,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5140").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Reload the component when the config file changes.
    pub watch_config: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5140".to_string(),
            request_timeout_secs: 30,
            watch_config: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Frontend entry paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Source entry used in development.
    pub dev: String,

    /// Built bundle directory used in production.
    pub prod: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            dev: "client/index.ts".to_string(),
            prod: "dist".to_string(),
        }
    }
}
