// src/intercept/mod.rs
//! Network interception layer
//!
//! The host-controlled context that intercepts outbound page requests and
//! forwards them to the client context over message passing:
//!
//! - **Exclusions**: paths that always bypass interception
//! - **Fetch**: intercepted network events and their outcomes
//! - **Layer**: the `WaitingForInit → Ready` state machine and event loop
//! - **Registry**: registration surface and controller-change signal
//!
//! # Architecture
//!
//! ```text
//! Page fetch ─→ InterceptionLayer ──request──→ Bridge (client context)
//!                   │    ▲                        │
//!                   │    └───────response─────────┘
//!                   ▼
//!            PendingTable (reqId → resolver)
//! ```

pub mod exclusions;
pub mod fetch;
pub mod layer;
pub mod registry;

// Re-export commonly used types
pub use exclusions::ExclusionRules;
pub use fetch::{FetchEvent, FetchOutcome};
pub use layer::InterceptionLayer;
pub use registry::{ContextRegistry, Envelope, Registration};
