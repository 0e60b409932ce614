// src/rpc/host.rs
//! Host collaborator boundary
//!
//! The privileged backend is consumed through a single asynchronous call
//! operation; its internals are out of scope. The handle arrives late (the
//! host boots after the bridge), so it lives in a shared slot.

use crate::rpc::channel::ByteChannel;
use crate::utils::errors::Result;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Value and byte stream produced by a host call
pub struct HostReply {
    /// Call value; for web requests, the response headers
    pub value: HashMap<String, String>,

    /// Streamed response body
    pub channel: ByteChannel,
}

/// Call interface of the privileged backend
pub trait HostHandle: Send + Sync {
    /// Invoke the host's call primitive addressed by an entry-point name
    /// with positional arguments
    fn call(&self, entry_point: &str, args: Vec<String>) -> BoxFuture<'_, Result<HostReply>>;
}

/// Late-binding slot for the externally supplied host handle
#[derive(Default)]
pub struct HostSlot {
    inner: RwLock<Option<Arc<dyn HostHandle>>>,
}

impl HostSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the host handle once the host has booted
    pub async fn install(&self, handle: Arc<dyn HostHandle>) {
        *self.inner.write().await = Some(handle);
        info!("Host handle installed");
    }

    /// Current host handle, if one has been installed
    pub async fn get(&self) -> Option<Arc<dyn HostHandle>> {
        self.inner.read().await.clone()
    }

    /// Whether a host handle is available
    pub async fn is_installed(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
