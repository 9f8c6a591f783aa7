//! Content-addressed storage.
//!
//! # Data Flow
//! ```text
//! UploadFile (name, bytes, MIME type)
//!     → ContentStore::upload
//!         → pinata.rs (HTTP pinning API, bearer credential)
//!         → memory.rs (in-process, SHA-256 addressed)
//!     → ContentId (opaque)
//!     → locator "ipfs://<id>" / public gateway URL
//! ```
//!
//! Identifiers are never parsed or constructed by callers; they are only
//! prefixed with the scheme.

pub mod memory;
pub mod pinata;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use pinata::PinataStore;

/// Scheme prefixed to content identifiers.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Errors returned by a content store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No credential configured. Raised before any network I/O.
    #[error("{0}")]
    MissingCredential(String),

    /// The store refused the credential.
    #[error("Content store authorization failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The store rejected the upload.
    #[error("Content store rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Connection, TLS or timeout failure.
    #[error("Content store request failed: {0}")]
    Transport(String),

    /// The store answered with an unusable body.
    #[error("Invalid content store response: {0}")]
    Response(String),
}

/// A single artifact to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Opaque content identifier returned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ipfs://<id>` locator.
    pub fn locator(&self) -> String {
        format!("{}{}", IPFS_SCHEME, self.0)
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrite an `ipfs://` locator to a public gateway URL.
///
/// Locators with any other scheme are returned unchanged.
pub fn gateway_url(locator: &str, gateway: &str) -> String {
    match locator.strip_prefix(IPFS_SCHEME) {
        Some(id) => format!("{}/{}", gateway.trim_end_matches('/'), id),
        None => locator.to_string(),
    }
}

/// Content-addressed binary storage.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store one artifact and return its identifier.
    async fn upload(&self, file: UploadFile) -> Result<ContentId, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_and_gateway_rewrite() {
        let id = ContentId::new("bafyabc");
        assert_eq!(id.locator(), "ipfs://bafyabc");
        assert_eq!(
            gateway_url(&id.locator(), "https://gateway.pinata.cloud/ipfs/"),
            "https://gateway.pinata.cloud/ipfs/bafyabc"
        );
        assert_eq!(
            gateway_url("ipfs://x", "https://gw.example/ipfs"),
            "https://gw.example/ipfs/x"
        );
        assert_eq!(gateway_url("https://a/b", "https://gw"), "https://a/b");
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Unauthorized {
            status: 401,
            message: "Invalid token".into(),
        };
        assert_eq!(err.to_string(), "Content store authorization failed (401): Invalid token");
    }
}
