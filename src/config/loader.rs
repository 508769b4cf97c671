//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::client::ClientConfig;
use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate, ValidationError};
use crate::observability::metrics;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid [plugin] config: {0}")]
    Validation(#[from] ValidationError),
}

/// A parsed file together with its validated client config.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub bridge: BridgeConfig,
    pub client: ClientConfig,
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<LoadedConfig, ConfigError> {
    let bridge: BridgeConfig = toml::from_str(content)?;
    let client = validate(&bridge.plugin).inspect_err(|e| {
        metrics::record_config_rejection(e.field().unwrap_or("plugin"));
    })?;

    Ok(LoadedConfig { bridge, client })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
