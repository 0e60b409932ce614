// src/bridge/resolver.rs
//! Ordered request resolution chain
//!
//! Resolvers are tried in sequence; each returns a definite outcome instead
//! of silently falling through. The chain converts outcomes and failures into
//! protocol responses.

use crate::protocol::{Request, Response};
use crate::utils::errors::Result;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Definite outcome of a single resolver
#[derive(Debug, PartialEq)]
pub enum Resolution {
    /// Payload for the request
    Resolved {
        body: Vec<u8>,
        headers: HashMap<String, String>,
    },

    /// Structured failure reported back to the requester
    Failed(String),

    /// This resolver does not handle the request; try the next one
    NotResolved,
}

/// A single capability in the resolution chain
pub trait RequestResolver: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Attempt to resolve the request
    fn resolve<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<Resolution>>;
}

/// Ordered list of resolvers tried until one resolves
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn RequestResolver>>,
}

impl ResolverChain {
    /// Create a chain from resolvers in priority order
    pub fn new(resolvers: Vec<Arc<dyn RequestResolver>>) -> Self {
        Self { resolvers }
    }

    /// Run the chain and produce the response for a request.
    ///
    /// A resolver error is logged and converted into a structured error
    /// response, the same propagation path as a host-call failure.
    pub async fn resolve(&self, request: &Request) -> Response {
        for resolver in &self.resolvers {
            match resolver.resolve(request).await {
                Ok(Resolution::Resolved { body, headers }) => {
                    return Response::with_body(request.id, body, headers);
                }
                Ok(Resolution::Failed(message)) => {
                    return Response::with_error(request.id, message);
                }
                Ok(Resolution::NotResolved) => continue,
                Err(e) => {
                    error!(
                        "Resolver {} failed for {}: {}",
                        resolver.name(),
                        request.path,
                        e
                    );
                    return Response::with_error(request.id, e.to_string());
                }
            }
        }

        debug!("No resolver handled {}", request.path);
        Response::with_error(request.id, format!("no resolver for {}", request.path))
    }
}
