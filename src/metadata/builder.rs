//! Fluent builder for coin metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::article::FeaturedImage;
use crate::metadata::MetadataError;

/// Typed media reference: the canonical content of the coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaContent {
    pub mime: String,
    pub uri: String,
}

/// The JSON document stored as the coin's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MediaContent>,
}

/// Accumulates metadata fields and an optional image file.
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    name: String,
    symbol: String,
    description: String,
    properties: BTreeMap<String, String>,
    image: Option<FeaturedImage>,
    image_uri: Option<String>,
    media: Option<MediaContent>,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Merge string properties. Later keys overwrite earlier ones.
    pub fn with_properties<K, V, I>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_image(mut self, image: FeaturedImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Reference an image that is already stored.
    pub fn with_image_uri(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }

    pub fn with_media_uri(mut self, uri: impl Into<String>, mime: impl Into<String>) -> Self {
        self.media = Some(MediaContent {
            uri: uri.into(),
            mime: mime.into(),
        });
        self
    }

    pub fn image(&self) -> Option<&FeaturedImage> {
        self.image.as_ref()
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<(), MetadataError> {
        for (field, value) in [
            ("name", &self.name),
            ("symbol", &self.symbol),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(MetadataError::Invalid(format!("{} is required", field)));
            }
        }
        Ok(())
    }

    /// Produce the document. `uploaded_image` is the locator of the image
    /// file stored by the uploader and wins over `with_image_uri`.
    pub fn build(&self, uploaded_image: Option<String>) -> Result<CoinMetadata, MetadataError> {
        self.validate()?;
        Ok(CoinMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            image: uploaded_image.or_else(|| self.image_uri.clone()),
            properties: self.properties.clone(),
            content: self.media.clone(),
        })
    }
}
