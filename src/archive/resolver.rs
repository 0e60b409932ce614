// src/archive/resolver.rs
//! Archive tier of the resolution chain
//!
//! Resolves requests whose path falls under the reserved archive prefix by
//! decoding the matching entry. Everything else is a definite NotResolved so
//! control passes to the next tier.

use crate::archive::store::Archive;
use crate::bridge::resolver::{RequestResolver, Resolution};
use crate::protocol::Request;
use crate::utils::errors::Result;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Resolver backed by the preloaded archive
pub struct ArchiveResolver {
    /// The archive, if one was preloaded
    archive: Option<Arc<Archive>>,

    /// Full path prefix reserved for archive entries
    prefix: String,
}

impl ArchiveResolver {
    /// Create a resolver over an optional archive and its route prefix
    pub fn new(archive: Option<Arc<Archive>>, prefix: impl Into<String>) -> Self {
        Self {
            archive,
            prefix: prefix.into(),
        }
    }
}

impl RequestResolver for ArchiveResolver {
    fn name(&self) -> &'static str {
        "archive"
    }

    fn resolve<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<Resolution>> {
        Box::pin(async move {
            let Some(archive) = &self.archive else {
                return Ok(Resolution::NotResolved);
            };

            let Some(name) = request.path.strip_prefix(&self.prefix) else {
                return Ok(Resolution::NotResolved);
            };

            let Some(entry) = archive.get(name) else {
                debug!("Archive miss for {}", request.path);
                return Ok(Resolution::NotResolved);
            };

            let body = entry.decode()?;
            debug!("Served {} from archive ({} bytes)", request.path, body.len());

            let mut headers = HashMap::new();
            headers.insert("content-type".to_string(), entry.content_type.clone());

            Ok(Resolution::Resolved { body, headers })
        })
    }
}
