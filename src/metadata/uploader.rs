//! Metadata upload path.

use async_trait::async_trait;
use std::sync::Arc;

use crate::metadata::{MetadataBuilder, MetadataError};
use crate::storage::{ContentStore, UploadFile};

/// Result of storing a metadata document.
#[derive(Debug, Clone)]
pub struct UploadedMetadata {
    /// Locator of the stored document.
    pub url: String,
    /// The document as stored.
    pub metadata: serde_json::Value,
}

/// Stores a metadata document and returns its locator.
#[async_trait]
pub trait MetadataUploader: Send + Sync {
    async fn upload(&self, builder: MetadataBuilder) -> Result<UploadedMetadata, MetadataError>;
}

/// Uploader that writes the image and document to a content store.
#[derive(Clone)]
pub struct StoreMetadataUploader {
    store: Arc<dyn ContentStore>,
}

impl StoreMetadataUploader {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MetadataUploader for StoreMetadataUploader {
    async fn upload(&self, builder: MetadataBuilder) -> Result<UploadedMetadata, MetadataError> {
        builder.validate()?;

        let image_uri = match builder.image() {
            Some(image) => {
                let id = self
                    .store
                    .upload(UploadFile::new(
                        image.file_name.clone(),
                        image.bytes.clone(),
                        image.mime_type.clone(),
                    ))
                    .await?;
                Some(id.locator())
            }
            None => None,
        };

        let document = builder.build(image_uri)?;
        let bytes = serde_json::to_vec_pretty(&document)?;
        let id = self
            .store
            .upload(UploadFile::new("metadata.json", bytes, "application/json"))
            .await?;

        tracing::info!(cid = %id, symbol = %document.symbol, "Metadata stored");
        Ok(UploadedMetadata {
            url: id.locator(),
            metadata: serde_json::to_value(&document)?,
        })
    }
}
