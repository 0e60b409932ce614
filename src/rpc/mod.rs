// src/rpc/mod.rs
//! Host RPC dispatch
//!
//! Second tier of the resolution chain:
//!
//! - **Channel**: readable byte stream drained into an in-memory buffer
//! - **Host**: call interface of the privileged backend plus its late-binding
//!   slot
//! - **Dispatcher**: forwards requests through the host's call primitive

pub mod channel;
pub mod dispatcher;
pub mod host;

// Re-export commonly used types
pub use channel::ByteChannel;
pub use dispatcher::RpcDispatcher;
pub use host::{HostHandle, HostReply, HostSlot};
