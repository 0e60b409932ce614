// src/intercept/registry.rs
//! Registration of interception layers
//!
//! Models the host environment's registration surface: query the active
//! registration, install a new layer (spawning its event loop in its own
//! context), and observe the controller-change signal raised when the layer
//! claims the page.

use crate::bridge::ready_gate::ReadyGate;
use crate::intercept::fetch::{FetchEvent, FetchOutcome};
use crate::intercept::layer::InterceptionLayer;
use crate::protocol::Message;
use crate::utils::errors::{BridgeError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// A message and the handle of the context that sent it
#[derive(Debug)]
pub struct Envelope {
    /// The control message
    pub message: Message,

    /// Sender reaching back into the originating context
    pub source: mpsc::Sender<Message>,
}

/// Handle to an active interception-layer registration
#[derive(Clone)]
pub struct Registration {
    control: mpsc::Sender<Envelope>,
    fetches: mpsc::Sender<FetchEvent>,
}

impl Registration {
    /// Post a control message to the layer, identifying the sending context
    pub async fn post(&self, message: Message, source: mpsc::Sender<Message>) -> Result<()> {
        self.control
            .send(Envelope { message, source })
            .await
            .map_err(|_| BridgeError::ChannelClosed("interception layer control channel".to_string()))
    }

    /// Drive an intercepted network event through the layer and await its
    /// outcome. Stays suspended for as long as the layer does.
    pub async fn fetch(
        &self,
        method: &str,
        url: &str,
        headers: HashMap<String, String>,
    ) -> Result<FetchOutcome> {
        let (event, outcome) = FetchEvent::new(method, url, headers)?;

        self.fetches
            .send(event)
            .await
            .map_err(|_| BridgeError::ChannelClosed("interception layer fetch channel".to_string()))?;

        outcome
            .await
            .map_err(|_| BridgeError::InterceptionFailed("interception context torn down".to_string()))
    }
}

/// Registry of interception-layer registrations for the page's scope
pub struct ContextRegistry {
    active: Mutex<Option<Registration>>,
    controller_change: Arc<ReadyGate>,
    channel_capacity: usize,
}

impl ContextRegistry {
    /// Create an empty registry
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            active: Mutex::new(None),
            controller_change: Arc::new(ReadyGate::new()),
            channel_capacity,
        }
    }

    /// Existing active registration controlling this scope, if any
    pub fn active(&self) -> Option<Registration> {
        self.active.lock().clone()
    }

    /// Register an interception layer, spawning its event loop
    pub fn register(&self, layer: InterceptionLayer) -> Registration {
        let (control_tx, control_rx) = mpsc::channel(self.channel_capacity);
        let (fetch_tx, fetch_rx) = mpsc::channel(self.channel_capacity);

        tokio::spawn(layer.run(control_rx, fetch_rx, Arc::clone(&self.controller_change)));

        let registration = Registration {
            control: control_tx,
            fetches: fetch_tx,
        };

        *self.active.lock() = Some(registration.clone());
        info!("Interception layer registered");

        registration
    }

    /// Suspend until an interception layer has claimed control of the page
    pub async fn controller_changed(&self) {
        self.controller_change.wait().await;
    }

    /// Whether the page is currently under interception-layer control
    pub fn is_controlled(&self) -> bool {
        self.controller_change.is_fulfilled()
    }
}
