// src/bridge/ready_gate.rs
//! Single-fire readiness signal
//!
//! One producer fulfills the gate exactly once; a second fulfillment is a
//! no-op. Waiters that arrive after fulfillment return immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// One-shot synchronization gate
#[derive(Default)]
pub struct ReadyGate {
    fulfilled: AtomicBool,
    notify: Notify,
}

impl ReadyGate {
    /// Create an unfulfilled gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Fulfill the gate, waking all waiters. No-op if already fulfilled.
    pub fn fulfill(&self) {
        if self.fulfilled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.notify.notify_waiters();
    }

    /// Whether the gate has been fulfilled
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled.load(Ordering::SeqCst)
    }

    /// Suspend until the gate is fulfilled
    pub async fn wait(&self) {
        loop {
            // Register interest before checking the flag so a concurrent
            // fulfill cannot slip between the check and the await.
            let notified = self.notify.notified();
            if self.fulfilled.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }
}
