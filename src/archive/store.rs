// src/archive/store.rs
//! Preloaded archive of compressed, named byte blobs
//!
//! Entries are base64-encoded gzip blobs keyed by file name, loadable from a
//! JSON mapping. The store is read-only once built.

use crate::utils::errors::{BridgeError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A single archived file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Base64-encoded gzip blob
    pub data: String,

    /// MIME type served as the content-type header
    #[serde(rename = "type")]
    pub content_type: String,
}

impl ArchiveEntry {
    /// Decode and decompress the stored blob into its original bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        let compressed = BASE64
            .decode(self.data.as_bytes())
            .map_err(|e| BridgeError::ArchiveFailed(format!("Base64 decode error: {}", e)))?;

        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut bytes = Vec::new();
        decoder
            .read_to_end(&mut bytes)
            .map_err(|e| BridgeError::ArchiveFailed(format!("Gzip decode error: {}", e)))?;

        Ok(bytes)
    }
}

/// Read-only mapping of file names to archived entries
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: HashMap<String, ArchiveEntry>,
}

impl Archive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an archive from a prepared mapping
    pub fn from_entries(entries: HashMap<String, ArchiveEntry>) -> Self {
        Self { entries }
    }

    /// Parse an archive from JSON bytes (file name → {data, type})
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let entries: HashMap<String, ArchiveEntry> = serde_json::from_slice(bytes)
            .map_err(|e| BridgeError::ArchiveFailed(format!("Archive parse error: {}", e)))?;

        debug!("Parsed archive with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Read and parse an archive from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| {
            BridgeError::ArchiveFailed(format!(
                "Archive read error at {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json_slice(&bytes)
    }

    /// Look up an entry by file name
    pub fn get(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries.get(name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::testutil::gzip_b64;
    use std::io::Write;

    #[test]
    fn test_decode_round_trip() {
        let entry = ArchiveEntry {
            data: gzip_b64(b"{}"),
            content_type: "application/javascript".to_string(),
        };

        let bytes = entry.decode().unwrap();
        assert_eq!(bytes, b"{}");
        assert_eq!(bytes.len(), 2);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let entry = ArchiveEntry {
            data: "not base64!!!".to_string(),
            content_type: "text/plain".to_string(),
        };

        let err = entry.decode().unwrap_err();
        assert!(err.to_string().contains("Base64"));
    }

    #[test]
    fn test_decode_rejects_non_gzip_payload() {
        let entry = ArchiveEntry {
            data: BASE64.encode(b"plain bytes, no gzip header"),
            content_type: "text/plain".to_string(),
        };

        let err = entry.decode().unwrap_err();
        assert!(err.to_string().contains("Gzip"));
    }

    #[test]
    fn test_from_json_slice() {
        let json = format!(
            r#"{{"duplex.js": {{"data": "{}", "type": "application/javascript"}}}}"#,
            gzip_b64(b"{}")
        );

        let archive = Archive::from_json_slice(json.as_bytes()).unwrap();
        assert_eq!(archive.len(), 1);

        let entry = archive.get("duplex.js").unwrap();
        assert_eq!(entry.content_type, "application/javascript");
        assert_eq!(entry.decode().unwrap(), b"{}");
    }

    #[test]
    fn test_from_json_file() {
        let json = format!(
            r#"{{"worker.js": {{"data": "{}", "type": "application/javascript"}}}}"#,
            gzip_b64(b"export {};")
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let archive = Archive::from_json_file(file.path()).unwrap();
        assert_eq!(archive.get("worker.js").unwrap().decode().unwrap(), b"export {};");
    }

    #[test]
    fn test_missing_entry() {
        let archive = Archive::new();
        assert!(archive.is_empty());
        assert!(archive.get("duplex.js").is_none());
    }
}
