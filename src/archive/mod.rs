// src/archive/mod.rs
//! Embedded archive resolution
//!
//! Serves a subset of requests from a preloaded, compressed archive before
//! the host is available:
//!
//! - **Store**: read-only mapping of file names to base64-encoded gzip blobs
//! - **Resolver**: first tier of the resolution chain, matching the reserved
//!   archive path prefix

pub mod resolver;
pub mod store;

// Re-export commonly used types
pub use resolver::ArchiveResolver;
pub use store::{Archive, ArchiveEntry};
