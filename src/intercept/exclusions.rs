// src/intercept/exclusions.rs
//! Interception exclusion set
//!
//! Paths the layer must never intercept: the root page, the favicon, the
//! bootstrap script, the internal system-asset prefix, the bootloader alias
//! prefix, and the index document. Excluded paths fall through to normal
//! network handling.

use crate::utils::config::BridgeConfig;

/// Compiled exclusion rules for a given base path
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    /// Root page path (exact match)
    root: String,

    /// Prefix matches under the base path
    prefixes: Vec<String>,
}

impl ExclusionRules {
    /// Build the rules for a base path using the configured names
    pub fn new(base_path: &str, config: &BridgeConfig) -> Self {
        let prefixes = vec![
            format!("{}{}", base_path, config.bootstrap_script),
            format!("{}{}", base_path, config.system_asset_prefix),
            format!("{}{}", base_path, config.bootloader_alias),
            format!("{}{}", base_path, config.index_document),
        ];

        Self {
            root: base_path.to_string(),
            prefixes,
        }
    }

    /// Whether a path must bypass interception
    pub fn is_excluded(&self, path: &str) -> bool {
        path == "/favicon.ico"
            || path == self.root
            || self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}
