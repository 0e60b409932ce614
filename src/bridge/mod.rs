// src/bridge/mod.rs
//! Client-side bridge orchestration
//!
//! Makes the interception layer active and ready before yielding to the
//! caller, then keeps routing its request messages through the resolution
//! chain:
//!
//! - **Ready Gate**: single-fire signal fulfilled by the ready acknowledgment
//! - **Resolver**: ordered resolution chain (archive first, host second)
//! - **Bridge**: registration, init handshake, and the message pump

pub mod ready_gate;
pub mod resolver;

// Re-export commonly used types
pub use ready_gate::ReadyGate;
pub use resolver::{RequestResolver, Resolution, ResolverChain};

use crate::archive::resolver::ArchiveResolver;
use crate::archive::store::Archive;
use crate::intercept::layer::InterceptionLayer;
use crate::intercept::registry::{ContextRegistry, Registration};
use crate::protocol::Message;
use crate::rpc::dispatcher::RpcDispatcher;
use crate::rpc::host::HostSlot;
use crate::utils::config::BridgeConfig;
use crate::utils::errors::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Client-side orchestrator for the interception layer
pub struct Bridge {
    config: BridgeConfig,
    chain: Arc<ResolverChain>,
}

impl Bridge {
    /// Create a bridge over an explicit resolver chain
    pub fn new(config: BridgeConfig, resolvers: Vec<Arc<dyn RequestResolver>>) -> Self {
        Self {
            config,
            chain: Arc::new(ResolverChain::new(resolvers)),
        }
    }

    /// Standard two-tier chain: embedded archive first, live host second
    pub fn with_standard_resolvers(
        config: BridgeConfig,
        archive: Option<Arc<Archive>>,
        host: Arc<HostSlot>,
    ) -> Self {
        let archive_resolver = ArchiveResolver::new(archive, config.archive_route_prefix());
        let dispatcher = RpcDispatcher::new(
            host,
            config.rpc_entry_point.clone(),
            config.base_path.clone(),
        );

        Self::new(config, vec![Arc::new(archive_resolver), Arc::new(dispatcher)])
    }

    /// Boot the interception layer and suspend until it is ready.
    ///
    /// Only after this returns may the caller load further resources;
    /// earlier, the layer would silently pass through requests meant for the
    /// host because its context handle was not yet set.
    pub async fn boot(&self, registry: &ContextRegistry) -> Result<BridgeHandle> {
        // Locate the active registration or install a fresh layer and wait
        // until it controls the page.
        let registration = match registry.active() {
            Some(registration) => {
                debug!("Reusing active interception layer registration");
                registration
            }
            None => {
                let layer = InterceptionLayer::new(self.config.clone());
                let registration = registry.register(layer);
                registry.controller_changed().await;
                registration
            }
        };

        let ready = Arc::new(ReadyGate::new());
        let (inbound_tx, inbound_rx) = mpsc::channel::<Message>(self.config.channel_capacity);

        let pump = self.spawn_pump(
            inbound_rx,
            inbound_tx.clone(),
            registration.clone(),
            Arc::clone(&ready),
        );

        registration
            .post(
                Message::Init {
                    base_path: self.config.base_path.clone(),
                },
                inbound_tx,
            )
            .await?;

        ready.wait().await;
        info!("Bridge ready, traffic now routes through the interception layer");

        Ok(BridgeHandle { registration, pump })
    }

    /// Spawn the inbound message pump: ready fulfills the gate, each request
    /// runs through the chain in its own task so responses may complete in
    /// any order.
    fn spawn_pump(
        &self,
        mut inbound_rx: mpsc::Receiver<Message>,
        reply_source: mpsc::Sender<Message>,
        registration: Registration,
        ready: Arc<ReadyGate>,
    ) -> JoinHandle<()> {
        let chain = Arc::clone(&self.chain);

        tokio::spawn(async move {
            while let Some(message) = inbound_rx.recv().await {
                match message {
                    Message::Ready => {
                        debug!("Interception layer acknowledged init");
                        ready.fulfill();
                    }
                    Message::Request(request) => {
                        let chain = Arc::clone(&chain);
                        let registration = registration.clone();
                        let reply_source = reply_source.clone();

                        tokio::spawn(async move {
                            let response = chain.resolve(&request).await;
                            if registration
                                .post(Message::Response(response), reply_source)
                                .await
                                .is_err()
                            {
                                warn!(
                                    "Interception layer gone, dropping response for reqId {}",
                                    request.id
                                );
                            }
                        });
                    }
                    Message::Init { .. } | Message::Response(_) => {
                        debug!("Dropping message not valid at the bridge boundary");
                    }
                }
            }
        })
    }
}

/// A booted bridge: the registration plus its running message pump
pub struct BridgeHandle {
    registration: Registration,
    pump: JoinHandle<()>,
}

impl BridgeHandle {
    /// The registration traffic flows through
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    /// Stop accepting new messages from the layer. Resolution tasks already
    /// spawned keep running and still deliver their responses.
    pub fn shutdown(&self) {
        self.pump.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::store::ArchiveEntry;
    use crate::archive::testutil::gzip_b64;
    use crate::intercept::fetch::FetchOutcome;
    use crate::rpc::channel::ByteChannel;
    use crate::rpc::host::{HostHandle, HostReply};
    use bytes::Bytes;
    use futures::future::BoxFuture;
    use std::collections::HashMap;

    fn sample_archive() -> Arc<Archive> {
        let mut entries = HashMap::new();
        entries.insert(
            "duplex.js".to_string(),
            ArchiveEntry {
                data: gzip_b64(b"{}"),
                content_type: "application/javascript".to_string(),
            },
        );
        Arc::new(Archive::from_entries(entries))
    }

    struct StaticHost;

    impl HostHandle for StaticHost {
        fn call(&self, _entry_point: &str, args: Vec<String>) -> BoxFuture<'_, Result<HostReply>> {
            Box::pin(async move {
                let (tx, channel) = ByteChannel::pipe(4);
                tokio::spawn(async move {
                    let _ = tx.send(Bytes::from(format!("host answered {}", args[1]))).await;
                });

                let mut value = HashMap::new();
                value.insert("content-type".to_string(), "text/plain".to_string());

                Ok(HostReply { value, channel })
            })
        }
    }

    async fn booted_bridge(
        archive: Option<Arc<Archive>>,
        host: Arc<HostSlot>,
    ) -> (ContextRegistry, BridgeHandle) {
        let config = BridgeConfig::default();
        let registry = ContextRegistry::new(config.channel_capacity);
        let bridge = Bridge::with_standard_resolvers(config, archive, host);
        let handle = bridge.boot(&registry).await.unwrap();
        (registry, handle)
    }

    #[tokio::test]
    async fn test_boot_completes_handshake() {
        let (registry, handle) = booted_bridge(None, Arc::new(HostSlot::new())).await;
        assert!(registry.is_controlled());
        handle.shutdown();
    }

    #[tokio::test]
    async fn test_archive_entry_served_before_host_exists() {
        let (_registry, handle) =
            booted_bridge(Some(sample_archive()), Arc::new(HostSlot::new())).await;

        let outcome = handle
            .registration()
            .fetch("GET", "http://localhost/~init/duplex.js", HashMap::new())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::Response { body, headers } => {
                assert_eq!(body, b"{}");
                assert_eq!(
                    headers.get("content-type").map(String::as_str),
                    Some("application/javascript")
                );
            }
            other => panic!("Expected response outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_host_surfaces_as_network_error() {
        let (_registry, handle) = booted_bridge(None, Arc::new(HostSlot::new())).await;

        let outcome = handle
            .registration()
            .fetch("GET", "http://localhost/api/x", HashMap::new())
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::NetworkError);
    }

    #[tokio::test]
    async fn test_host_installed_after_boot_serves_requests() {
        let host = Arc::new(HostSlot::new());
        let (_registry, handle) = booted_bridge(None, Arc::clone(&host)).await;

        host.install(Arc::new(StaticHost)).await;

        let outcome = handle
            .registration()
            .fetch("GET", "http://localhost/api/x", HashMap::new())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::Response { body, .. } => {
                assert_eq!(body, b"host answered http://localhost/api/x");
            }
            other => panic!("Expected response outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_excluded_paths_pass_through() {
        let (_registry, handle) = booted_bridge(None, Arc::new(HostSlot::new())).await;

        let outcome = handle
            .registration()
            .fetch("GET", "http://localhost/index.html", HashMap::new())
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::PassThrough);
    }

    #[tokio::test]
    async fn test_second_boot_reuses_registration() {
        let config = BridgeConfig::default();
        let registry = ContextRegistry::new(config.channel_capacity);
        let host = Arc::new(HostSlot::new());

        let first = Bridge::with_standard_resolvers(config.clone(), None, Arc::clone(&host));
        let first_handle = first.boot(&registry).await.unwrap();
        first_handle.shutdown();

        // A second bridge finds the active registration and re-runs the
        // handshake against the same layer.
        let second = Bridge::with_standard_resolvers(config, Some(sample_archive()), host);
        let second_handle = second.boot(&registry).await.unwrap();

        let outcome = second_handle
            .registration()
            .fetch("GET", "http://localhost/~init/duplex.js", HashMap::new())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::Response { body, .. } => assert_eq!(body, b"{}"),
            other => panic!("Expected response outcome, got {:?}", other),
        }
    }

    struct SlowHost;

    impl HostHandle for SlowHost {
        fn call(&self, _entry_point: &str, _args: Vec<String>) -> BoxFuture<'_, Result<HostReply>> {
            Box::pin(async move {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;

                let (tx, channel) = ByteChannel::pipe(4);
                tokio::spawn(async move {
                    let _ = tx.send(Bytes::from_static(b"late reply")).await;
                });

                Ok(HostReply {
                    value: HashMap::new(),
                    channel,
                })
            })
        }
    }

    #[tokio::test]
    async fn test_shutdown_lets_in_flight_resolutions_finish() {
        let host = Arc::new(HostSlot::new());
        host.install(Arc::new(SlowHost)).await;
        let (_registry, handle) = booted_bridge(None, host).await;

        let registration = handle.registration().clone();
        let fetch = tokio::spawn(async move {
            registration
                .fetch("GET", "http://localhost/api/x", HashMap::new())
                .await
                .unwrap()
        });

        // Let the pump pick up the request and spawn its resolution task,
        // then stop the pump while the host call is still sleeping.
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        handle.shutdown();

        match fetch.await.unwrap() {
            FetchOutcome::Response { body, .. } => assert_eq!(body, b"late reply"),
            other => panic!("Expected response outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_fetches_resolve_independently() {
        let (_registry, handle) =
            booted_bridge(Some(sample_archive()), Arc::new(HostSlot::new())).await;

        let registration = handle.registration().clone();
        let archive_fetch = {
            let registration = registration.clone();
            tokio::spawn(async move {
                registration
                    .fetch("GET", "http://localhost/~init/duplex.js", HashMap::new())
                    .await
                    .unwrap()
            })
        };
        let api_fetch = tokio::spawn(async move {
            registration
                .fetch("GET", "http://localhost/api/x", HashMap::new())
                .await
                .unwrap()
        });

        let archive_outcome = archive_fetch.await.unwrap();
        let api_outcome = api_fetch.await.unwrap();

        match archive_outcome {
            FetchOutcome::Response { body, .. } => assert_eq!(body, b"{}"),
            other => panic!("Expected response outcome, got {:?}", other),
        }
        assert_eq!(api_outcome, FetchOutcome::NetworkError);
    }
}
