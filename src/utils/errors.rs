// src/utils/errors.rs
//! Error types for the bridge
//!
//! A single error enum covers all failure classes; the crate-wide `Result`
//! alias is re-exported from the library root.

use thiserror::Error;

/// Bridge error type
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Archive entry could not be decoded or decompressed
    #[error("Archive failed: {0}")]
    ArchiveFailed(String),

    /// Request dispatch to the host failed
    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),

    /// Interception-layer boundary failure
    #[error("Interception failed: {0}")]
    InterceptionFailed(String),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The peer context's channel is gone
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, BridgeError>;
