// src/rpc/channel.rs
//! Readable byte channel
//!
//! The stream half of a host reply: chunks are produced by the host and
//! drained into an in-memory buffer by the dispatcher. Supports explicit
//! close.

use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;

/// Readable byte stream backed by a bounded channel
pub struct ByteChannel {
    rx: mpsc::Receiver<Bytes>,
}

impl ByteChannel {
    /// Create a connected (writer, reader) pair
    pub fn pipe(capacity: usize) -> (mpsc::Sender<Bytes>, ByteChannel) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, ByteChannel { rx })
    }

    /// Read chunks until the channel is exhausted, buffering them in memory.
    ///
    /// Suspends the caller until the writer side is dropped or the channel is
    /// closed; already-buffered chunks are still delivered after a close.
    pub async fn drain(&mut self) -> Vec<u8> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.rx.recv().await {
            buf.extend_from_slice(&chunk);
        }
        buf.to_vec()
    }

    /// Close the channel; no further chunks will be accepted
    pub fn close(&mut self) {
        self.rx.close();
    }
}
