// src/intercept/layer.rs
//! Interception layer state machine and event loop
//!
//! Runs single-threaded and cooperative in its own context; all state (the
//! pending table, the request id counter, the stored client handle) is
//! mutated only inside the loop. The layer moves `WaitingForInit → Ready`
//! once per activation and claims control of the page's clients immediately
//! on activation so interception starts without a reload.

use crate::bridge::ready_gate::ReadyGate;
use crate::intercept::exclusions::ExclusionRules;
use crate::intercept::fetch::{FetchEvent, FetchOutcome};
use crate::intercept::registry::Envelope;
use crate::protocol::{Message, Request, Response};
use crate::utils::config::BridgeConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Lifecycle states of the layer after activation
enum LayerState {
    /// Activated but not yet initialized by a client context
    WaitingForInit,

    /// Initialized; intercepted requests are forwarded to the stored handle
    Ready {
        /// Originating context handle from the init message
        peer: mpsc::Sender<Message>,

        /// Exclusion rules compiled for the init message's base path
        exclusions: ExclusionRules,
    },
}

/// Host-controlled component intercepting outbound page requests
pub struct InterceptionLayer {
    config: BridgeConfig,
    state: LayerState,

    /// Pending table: reqId → fetch resolver. Entries are removed when the
    /// matching response arrives and never otherwise (no eviction, no
    /// timeout).
    pending: HashMap<u64, oneshot::Sender<FetchOutcome>>,

    /// Last allocated request id; strictly increasing, never reused
    next_req_id: u64,
}

impl InterceptionLayer {
    /// Create a layer in its pre-init state
    pub fn new(config: BridgeConfig) -> Self {
        let next_req_id = config.req_id_base;
        Self {
            config,
            state: LayerState::WaitingForInit,
            pending: HashMap::new(),
            next_req_id,
        }
    }

    /// Drive the layer's event loop until both inbound channels close.
    ///
    /// `claim` is the registry's controller-change gate, fulfilled first
    /// thing so the page is under interception-layer control immediately.
    pub async fn run(
        mut self,
        mut control: mpsc::Receiver<Envelope>,
        mut fetches: mpsc::Receiver<FetchEvent>,
        claim: Arc<ReadyGate>,
    ) {
        claim.fulfill();
        debug!("Interception layer activated, page clients claimed");

        loop {
            tokio::select! {
                envelope = control.recv() => match envelope {
                    Some(envelope) => self.on_message(envelope).await,
                    None => break,
                },
                event = fetches.recv() => match event {
                    Some(event) => self.on_fetch(event).await,
                    None => break,
                },
            }
        }

        debug!("Interception layer event loop stopped");
    }

    /// Handle an inbound control message, validated by variant
    async fn on_message(&mut self, envelope: Envelope) {
        match envelope.message {
            Message::Init { base_path } => {
                let exclusions = ExclusionRules::new(&base_path, &self.config);
                self.state = LayerState::Ready {
                    peer: envelope.source.clone(),
                    exclusions,
                };
                info!("Interception layer ready, base path {}", base_path);

                if envelope.source.send(Message::Ready).await.is_err() {
                    warn!("Client context went away before the ready acknowledgment");
                }
            }
            Message::Response(response) => self.on_response(response),
            Message::Ready | Message::Request(_) => {
                debug!("Dropping message not valid at the layer boundary");
            }
        }
    }

    /// Match a response to its pending request and fire the resolver
    fn on_response(&mut self, response: Response) {
        let Some(respond) = self.pending.remove(&response.req_id) else {
            // No matching pending request; should not occur under the
            // protocol's invariants.
            debug!("Dropping response for unknown reqId {}", response.req_id);
            return;
        };

        let outcome = if let Some(error) = response.error {
            warn!("{}", error);
            FetchOutcome::NetworkError
        } else {
            FetchOutcome::Response {
                body: response.body.unwrap_or_default(),
                headers: response.headers.unwrap_or_default(),
            }
        };

        let _ = respond.send(outcome);
    }

    /// Handle an intercepted network event
    async fn on_fetch(&mut self, event: FetchEvent) {
        let (peer, excluded) = match &self.state {
            LayerState::Ready { peer, exclusions } => {
                (peer.clone(), exclusions.is_excluded(&event.path))
            }
            LayerState::WaitingForInit => {
                event.resolve(FetchOutcome::PassThrough);
                return;
            }
        };

        if excluded {
            event.resolve(FetchOutcome::PassThrough);
            return;
        }

        self.next_req_id += 1;
        let id = self.next_req_id;

        let FetchEvent {
            method,
            url,
            path,
            headers,
            respond,
        } = event;

        let request = Request {
            id,
            method,
            url,
            path,
            headers,
        };

        self.pending.insert(id, respond);
        debug!(
            "Forwarding {} {} as reqId {} ({} pending)",
            request.method,
            request.path,
            id,
            self.pending.len()
        );

        if peer.send(Message::Request(request)).await.is_err() {
            warn!("Client context unavailable, abandoning reqId {}", id);
            self.pending.remove(&id);
        }
    }
}
