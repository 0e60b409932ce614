// src/lib.rs
//! Hostbridge Library
//!
//! A request-routing bridge that lets a client execution context boot a
//! privileged backend ("the host") while transparently redirecting the
//! page's network traffic through that backend once available. Before the
//! host exists, a subset of requests is served from a preloaded, compressed
//! archive.
//!
//! # Architecture
//!
//! The crate is structured into several key modules:
//!
//! - **protocol**: tagged messages crossing the context boundary
//! - **intercept**: the interception layer, its registry, and fetch events
//! - **bridge**: client-side orchestration, handshake, and resolver chain
//! - **archive**: preloaded compressed archive and its resolver tier
//! - **rpc**: host call boundary and RPC dispatch tier
//! - **observability**: tracing initialization
//! - **utils**: configuration and error types
//!
//! ```text
//! page fetch → InterceptionLayer ──request──→ Bridge
//!                                              │ ArchiveResolver
//!                                              │ RpcDispatcher → Host
//!              InterceptionLayer ←─response──  ┘
//! ```

// Public module exports
pub mod archive;
pub mod bridge;
pub mod intercept;
pub mod observability;
pub mod protocol;
pub mod rpc;
pub mod utils;

// Re-export commonly used types
pub use archive::{Archive, ArchiveEntry, ArchiveResolver};
pub use bridge::{Bridge, BridgeHandle, ReadyGate};
pub use intercept::{ContextRegistry, FetchOutcome, InterceptionLayer};
pub use protocol::{Message, Request, Response};
pub use rpc::{HostHandle, HostReply, HostSlot, RpcDispatcher};
pub use utils::config::BridgeConfig;
pub use utils::errors::{BridgeError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
