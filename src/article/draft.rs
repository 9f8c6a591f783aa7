//! Draft and published article records.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::article::image::data_uri_from_file;
use crate::error::{WorkflowError, WorkflowResult};

/// User-entered article fields.
///
/// `image` holds the featured image as a `data:<mime>;base64,<payload>` URI,
/// the same form it is embedded into the HTML rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    /// Decimal ETH amount for the initial purchase. Empty means fallback.
    pub mint_price: String,
}

/// On-disk draft format. `image_file` is resolved relative to the draft file.
#[derive(Debug, Deserialize)]
struct DraftFile {
    #[serde(flatten)]
    draft: ArticleDraft,
    #[serde(default)]
    image_file: Option<String>,
}

impl ArticleDraft {
    /// Create a draft without an image.
    pub fn new(
        title: impl Into<String>,
        excerpt: impl Into<String>,
        content: impl Into<String>,
        mint_price: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
            image: None,
            mint_price: mint_price.into(),
        }
    }

    /// Load a draft from a TOML file.
    pub fn load(path: &Path) -> WorkflowResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            WorkflowError::Validation(format!("Cannot read draft {}: {}", path.display(), e))
        })?;
        let parsed: DraftFile = toml::from_str(&raw).map_err(|e| {
            WorkflowError::Validation(format!("Invalid draft {}: {}", path.display(), e))
        })?;

        let mut draft = parsed.draft;
        if let Some(image_file) = parsed.image_file {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            draft.image = Some(data_uri_from_file(&base.join(image_file))?);
        }
        Ok(draft)
    }

    /// Check the fields required to publish.
    pub fn validate(&self) -> WorkflowResult<()> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("content", &self.content),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// True when no field has been filled in.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Locators produced by a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedArticle {
    /// `ipfs://` locator of the rendered HTML.
    pub article_uri: String,
    /// `ipfs://` locator of the rendered Markdown.
    pub markdown_uri: String,
    /// Locator returned by the metadata uploader.
    pub metadata_uri: String,
    pub html_cid: String,
    pub markdown_cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl PublishedArticle {
    /// Load a previously persisted publish result.
    pub fn load(path: &Path) -> WorkflowResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            WorkflowError::Validation(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            WorkflowError::Validation(format!("Invalid published article {}: {}", path.display(), e))
        })
    }

    /// Persist as pretty JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}
