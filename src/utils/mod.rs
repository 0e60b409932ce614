// src/utils/mod.rs
//! Common utilities
//!
//! - **Config**: bridge configuration with file/env overrides
//! - **Errors**: crate-wide error enum and `Result` alias

pub mod config;
pub mod errors;

// Re-export commonly used types
pub use config::BridgeConfig;
pub use errors::{BridgeError, Result};
