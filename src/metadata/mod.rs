//! Coin metadata documents.
//!
//! # Data Flow
//! ```text
//! MetadataBuilder (name, symbol, description, properties, image, media)
//!     → validate
//!     → MetadataUploader::upload
//!         → image stored first (optional), referenced as ipfs://<id>
//!         → metadata.json stored
//!     → UploadedMetadata { url, metadata }
//! ```

pub mod builder;
pub mod uploader;

use thiserror::Error;

use crate::storage::StoreError;

pub use builder::{CoinMetadata, MediaContent, MetadataBuilder};
pub use uploader::{MetadataUploader, StoreMetadataUploader, UploadedMetadata};

/// Errors building or storing a metadata document.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// A required field is missing.
    #[error("Invalid metadata: {0}")]
    Invalid(String),

    /// The document could not be serialized.
    #[error("Metadata encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
