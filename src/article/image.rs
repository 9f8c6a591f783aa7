//! Featured image decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

use crate::error::{WorkflowError, WorkflowResult};

/// Decoded featured image, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl FeaturedImage {
    /// Decode a `data:<mime>;base64,<payload>` URI.
    ///
    /// The file extension is the MIME subtype (`image/png` → `png`).
    pub fn from_data_uri(uri: &str) -> WorkflowResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| WorkflowError::Validation("Image is not a data URI".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| WorkflowError::Validation("Image data URI has no payload".to_string()))?;

        let mime_type = header.split(';').next().unwrap_or_default().trim();
        if !header.split(';').any(|p| p == "base64") {
            return Err(WorkflowError::Validation(
                "Image data URI must be base64 encoded".to_string(),
            ));
        }
        let extension = mime_type
            .split_once('/')
            .map(|(_, sub)| sub)
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| {
                WorkflowError::Validation(format!("Invalid image MIME type '{}'", mime_type))
            })?;

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| WorkflowError::Validation(format!("Invalid image encoding: {}", e)))?;

        Ok(Self {
            bytes,
            mime_type: mime_type.to_string(),
            file_name: format!("featured-image.{}", extension),
        })
    }
}

/// Guess an image MIME type from a file extension.
fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Read an image file and encode it as a data URI.
pub fn data_uri_from_file(path: &Path) -> WorkflowResult<String> {
    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(mime_for_extension)
        .ok_or_else(|| {
            WorkflowError::Validation(format!("Unsupported image type: {}", path.display()))
        })?;
    let bytes = fs::read(path).map_err(|e| {
        WorkflowError::Validation(format!("Cannot read image {}: {}", path.display(), e))
    })?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
