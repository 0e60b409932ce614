// src/utils/config.rs
//! Bridge configuration
//!
//! Defaults mirror the constants the protocol was built around (root base
//! path, `~init/` archive prefix, `web.request` host entry point). Values can
//! be overridden by an optional `bridge` config file or `BRIDGE_*` environment
//! variables.

use crate::utils::errors::{BridgeError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the bridge and its interception layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base path the page is served under (always ends with `/`)
    pub base_path: String,

    /// Bootstrap script name, excluded from interception
    pub bootstrap_script: String,

    /// Internal system-asset prefix, excluded from interception
    pub system_asset_prefix: String,

    /// Bootloader alias prefix, excluded from interception
    pub bootloader_alias: String,

    /// Index document name, excluded from interception
    pub index_document: String,

    /// Reserved path prefix served from the embedded archive
    pub archive_prefix: String,

    /// Entry-point name for host calls
    pub rpc_entry_point: String,

    /// Base value for request id allocation
    pub req_id_base: u64,

    /// Capacity of the channels between the two contexts
    pub channel_capacity: usize,

    /// Optional path to a JSON archive loaded at startup
    pub archive_path: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            bootstrap_script: "bootloader.js".to_string(),
            system_asset_prefix: "sys/dev".to_string(),
            bootloader_alias: "bootloader".to_string(),
            index_document: "index.html".to_string(),
            archive_prefix: "~init/".to_string(),
            rpc_entry_point: "web.request".to_string(),
            req_id_base: 0,
            channel_capacity: 64,
            archive_path: None,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from defaults, an optional `bridge` file in the
    /// working directory, and `BRIDGE_*` environment variables
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| BridgeError::ConfigError(format!("Default config error: {}", e)))?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("bridge").required(false))
            .add_source(Environment::with_prefix("BRIDGE"))
            .build()
            .map_err(|e| BridgeError::ConfigError(format!("Config build error: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| BridgeError::ConfigError(format!("Config parse error: {}", e)))
    }

    /// Load configuration from defaults plus an explicit config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| BridgeError::ConfigError(format!("Default config error: {}", e)))?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path))
            .build()
            .map_err(|e| BridgeError::ConfigError(format!("Config build error: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| BridgeError::ConfigError(format!("Config parse error: {}", e)))
    }

    /// Full path prefix under which archive entries are served
    pub fn archive_route_prefix(&self) -> String {
        format!("{}{}", self.base_path, self.archive_prefix)
    }
}
