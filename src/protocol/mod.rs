// src/protocol/mod.rs
//! Message protocol between the client context and the interception layer
//!
//! Four message shapes cross the context boundary:
//!
//! - **init**: client → layer, carries the base path
//! - **ready**: layer → client, marker acknowledging init
//! - **request**: layer → client, an intercepted network request
//! - **response**: client → layer, the correlated answer
//!
//! Serialization uses the original wire field names (`basePath`, `reqId`);
//! optional response fields are omitted when absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An intercepted network request forwarded to the client context.
///
/// `id` is unique within the interception layer's lifetime; the record is
/// immutable once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation id, strictly increasing, never reused
    pub id: u64,

    /// HTTP method of the intercepted request
    pub method: String,

    /// Full request URL
    pub url: String,

    /// Path component of the URL
    pub path: String,

    /// Request headers (name → value)
    pub headers: HashMap<String, String>,
}

/// The answer correlated to a [`Request`] by `req_id`.
///
/// Exactly one of (`body`, `headers`) or `error` is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Correlation id matching the request's `id`
    pub req_id: u64,

    /// Response payload bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<u8>>,

    /// Response headers (name → value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Structured failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Successful response carrying a payload
    pub fn with_body(req_id: u64, body: Vec<u8>, headers: HashMap<String, String>) -> Self {
        Self {
            req_id,
            body: Some(body),
            headers: Some(headers),
            error: None,
        }
    }

    /// Failed response carrying only an error message
    pub fn with_error(req_id: u64, error: impl Into<String>) -> Self {
        Self {
            req_id,
            body: None,
            headers: None,
            error: Some(error.into()),
        }
    }

    /// Whether this response reports a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Tagged control message exchanged between the two contexts.
///
/// Each variant is validated where it arrives; variants that are invalid at a
/// boundary are dropped there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Message {
    /// Handshake opener carrying the client's base path
    #[serde(rename_all = "camelCase")]
    Init { base_path: String },

    /// Acknowledgment that the interception layer is ready
    Ready,

    /// Intercepted network request
    Request(Request),

    /// Correlated answer to a request
    Response(Response),
}
