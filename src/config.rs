//! Configuration parsing.
//!
//! The endpoint section is handed to transport implementations, the engine
//! section tunes catalog building. Passwords are never read from the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::BIOS_DEVICE_FQDD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl SettingsConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or the endpoint is unusable.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.endpoint;
        if endpoint.host.trim().is_empty() {
            return Err(ConfigError::Validation("endpoint.host is empty".into()));
        }
        if endpoint.port == 0 {
            return Err(ConfigError::Validation("endpoint.port must not be 0".into()));
        }
        if !endpoint.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "endpoint.path must start with '/': '{}'",
                endpoint.path
            )));
        }
        if self.engine.bios_target.trim().is_empty() {
            return Err(ConfigError::Validation("engine.bios_target is empty".into()));
        }
        Ok(())
    }
}

/// Where the management controller listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_protocol")]
    pub protocol: String,

    #[serde(default)]
    pub username: Option<String>,
}

impl EndpointConfig {
    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.protocol, self.host, self.port, self.path)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            path: default_path(),
            protocol: default_protocol(),
            username: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enumerate the constraint namespaces of a family concurrently.
    #[serde(default = "default_concurrent_fetch")]
    pub concurrent_fetch: bool,

    /// Instance BIOS settings are written to.
    #[serde(default = "default_bios_target")]
    pub bios_target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrent_fetch: default_concurrent_fetch(),
            bios_target: default_bios_target(),
        }
    }
}

fn default_port() -> u16 {
    443
}

fn default_path() -> String {
    "/wsman".to_owned()
}

fn default_protocol() -> String {
    "https".to_owned()
}

const fn default_concurrent_fetch() -> bool {
    true
}

fn default_bios_target() -> String {
    BIOS_DEVICE_FQDD.to_owned()
}
