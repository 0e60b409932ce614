// src/intercept/fetch.rs
//! Intercepted network events
//!
//! A fetch event is one outbound page request suspended while the layer
//! decides its fate. The resolver half is a one-shot channel; if no outcome
//! ever arrives the event stays suspended until the context is torn down.

use crate::utils::errors::{BridgeError, Result};
use std::collections::HashMap;
use tokio::sync::oneshot;
use url::Url;

/// Outcome of an intercepted network event
#[derive(Debug, PartialEq)]
pub enum FetchOutcome {
    /// Not intercepted; normal network handling applies
    PassThrough,

    /// Concrete response materialized from a bridge reply
    Response {
        body: Vec<u8>,
        headers: HashMap<String, String>,
    },

    /// Generic network-level failure, no body, no headers
    NetworkError,
}

/// An outbound page network event awaiting resolution
#[derive(Debug)]
pub struct FetchEvent {
    /// HTTP method
    pub method: String,

    /// Full request URL
    pub url: String,

    /// Path component derived from the URL
    pub path: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    pub(crate) respond: oneshot::Sender<FetchOutcome>,
}

impl FetchEvent {
    /// Create an event and the receiver its outcome will arrive on
    pub fn new(
        method: impl Into<String>,
        url: &str,
        headers: HashMap<String, String>,
    ) -> Result<(Self, oneshot::Receiver<FetchOutcome>)> {
        let parsed = Url::parse(url)
            .map_err(|e| BridgeError::InterceptionFailed(format!("Invalid url {}: {}", url, e)))?;

        let (tx, rx) = oneshot::channel();

        let event = Self {
            method: method.into(),
            url: url.to_string(),
            path: parsed.path().to_string(),
            headers,
            respond: tx,
        };

        Ok((event, rx))
    }

    /// Resolve the event with a final outcome
    pub fn resolve(self, outcome: FetchOutcome) {
        // The requester may have gone away; nothing left to notify then.
        let _ = self.respond.send(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_path_derived_from_url() {
        let (event, _rx) =
            FetchEvent::new("GET", "http://localhost/~init/duplex.js", HashMap::new()).unwrap();
        assert_eq!(event.path, "/~init/duplex.js");
        assert_eq!(event.method, "GET");
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let err = FetchEvent::new("GET", "not a url", HashMap::new());
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_resolve_delivers_outcome() {
        let (event, rx) = FetchEvent::new("GET", "http://localhost/a", HashMap::new()).unwrap();
        event.resolve(FetchOutcome::PassThrough);
        assert_eq!(rx.await.unwrap(), FetchOutcome::PassThrough);
    }

    #[tokio::test]
    async fn test_dropped_event_unblocks_requester() {
        let (event, rx) = FetchEvent::new("GET", "http://localhost/a", HashMap::new()).unwrap();
        drop(event);
        assert!(rx.await.is_err());
    }
}
