// src/rpc/dispatcher.rs
//! RPC tier of the resolution chain
//!
//! Forwards a request to the host via its call primitive and buffers the
//! streamed response body. Terminal tier: it always produces a definite
//! outcome, reporting a structured error when no host handle is installed or
//! the call itself fails.

use crate::bridge::resolver::{RequestResolver, Resolution};
use crate::protocol::Request;
use crate::rpc::host::HostSlot;
use crate::utils::errors::Result;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, error};

/// Resolver that dispatches to the live host
pub struct RpcDispatcher {
    /// Slot holding the externally supplied host handle
    host: Arc<HostSlot>,

    /// Fixed entry-point name for web requests
    entry_point: String,

    /// Base path stripped from urls before the host call
    base_path: String,
}

impl RpcDispatcher {
    /// Create a dispatcher over a host slot
    pub fn new(
        host: Arc<HostSlot>,
        entry_point: impl Into<String>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            host,
            entry_point: entry_point.into(),
            base_path: base_path.into(),
        }
    }
}

/// Replace the first occurrence of the base path with the root path
fn rebase_url(url: &str, base_path: &str) -> String {
    url.replacen(base_path, "/", 1)
}

impl RequestResolver for RpcDispatcher {
    fn name(&self) -> &'static str {
        "rpc"
    }

    fn resolve<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<Resolution>> {
        Box::pin(async move {
            let Some(host) = self.host.get().await else {
                debug!("No host handle yet for {}", request.path);
                return Ok(Resolution::Failed(format!(
                    "host not loaded yet for {}",
                    request.path
                )));
            };

            let url = rebase_url(&request.url, &self.base_path);
            let args = vec![request.method.clone(), url];

            let mut reply = match host.call(&self.entry_point, args).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Host call failed for {}: {}", request.path, e);
                    return Ok(Resolution::Failed(format!(
                        "host call failed for {}: {}",
                        request.path, e
                    )));
                }
            };

            let body = reply.channel.drain().await;
            reply.channel.close();
            debug!("Host answered {} with {} bytes", request.path, body.len());

            Ok(Resolution::Resolved {
                body,
                headers: reply.value,
            })
        })
    }
}
