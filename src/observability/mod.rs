// src/observability/mod.rs
//! Tracing initialization
//!
//! Structured logging via `tracing`, filtered by `RUST_LOG` with an `info`
//! default.

use crate::utils::errors::{BridgeError, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| BridgeError::ConfigError(format!("Tracing init error: {}", e)))?;

    Ok(())
}
