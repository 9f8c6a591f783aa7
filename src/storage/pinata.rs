//! Pinata pinning API client.
//!
//! # Responsibilities
//! - Upload one file per request to `pinning/pinFileToIPFS`
//! - Refuse to send anything without a bearer credential
//! - Map API failures onto `StoreError` with the API's own message

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use crate::config::schema::{ContentStoreConfig, PINATA_JWT_ENV_VAR};
use crate::observability::metrics;
use crate::storage::{ContentId, ContentStore, StoreError, UploadFile};

/// Successful pin response. Only the hash is required.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
    #[serde(rename = "PinSize", default)]
    pin_size: Option<u64>,
}

/// `error` is either a plain string or a `{reason, details}` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorField {
    Detailed {
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        details: Option<String>,
    },
    Plain(String),
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<ApiErrorField>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiErrorBody {
    fn into_message(self) -> String {
        let from_error = match self.error {
            Some(ApiErrorField::Detailed { details, reason }) => details.or(reason),
            Some(ApiErrorField::Plain(s)) => Some(s),
            None => None,
        };
        from_error
            .or(self.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// Content store backed by the Pinata pinning service.
#[derive(Clone)]
pub struct PinataStore {
    client: reqwest::Client,
    endpoint: String,
    jwt: Option<String>,
    cid_version: u8,
    timeout: Duration,
}

impl PinataStore {
    /// Create a store from configuration, sharing the given HTTP client.
    pub fn new(config: &ContentStoreConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: format!("{}/pinning/pinFileToIPFS", config.api_url.trim_end_matches('/')),
            jwt: config.jwt.clone().filter(|j| !j.trim().is_empty()),
            cid_version: config.cid_version,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// True when a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.jwt.is_some()
    }

    fn build_form(&self, file: UploadFile) -> Result<Form, StoreError> {
        let metadata = serde_json::json!({ "name": file.name }).to_string();
        let options = serde_json::json!({ "cidVersion": self.cid_version }).to_string();
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.mime_type)
            .map_err(|e| StoreError::Transport(format!("Invalid MIME type: {}", e)))?;

        Ok(Form::new()
            .part("file", part)
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options))
    }
}

#[async_trait]
impl ContentStore for PinataStore {
    async fn upload(&self, file: UploadFile) -> Result<ContentId, StoreError> {
        let jwt = self.jwt.as_deref().ok_or_else(|| {
            StoreError::MissingCredential(format!(
                "{} environment variable is not set",
                PINATA_JWT_ENV_VAR
            ))
        })?;

        let name = file.name.clone();
        let size = file.bytes.len();
        let form = self.build_form(file)?;

        tracing::debug!(file = %name, bytes = size, "Uploading to Pinata");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(jwt)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                metrics::record_upload("transport_error", 0);
                StoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body.into_message();
            tracing::error!(
                file = %name,
                status = status.as_u16(),
                message = %message,
                "Pinata API error"
            );
            metrics::record_upload("rejected", 0);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                _ => StoreError::Rejected {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: PinResponse = serde_json::from_str(&text)
            .map_err(|e| StoreError::Response(format!("{} (body: {})", e, text)))?;
        let hash = body
            .ipfs_hash
            .filter(|h| !h.is_empty())
            .ok_or_else(|| StoreError::Response("missing IpfsHash".to_string()))?;

        metrics::record_upload("ok", size);
        tracing::info!(
            file = %name,
            cid = %hash,
            pin_size = body.pin_size.unwrap_or_default(),
            "Pinned file"
        );
        Ok(ContentId::new(hash))
    }
}

impl std::fmt::Debug for PinataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataStore")
            .field("endpoint", &self.endpoint)
            .field("has_credential", &self.jwt.is_some())
            .field("cid_version", &self.cid_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(jwt: Option<&str>) -> ContentStoreConfig {
        ContentStoreConfig {
            // Nothing listens here; any I/O attempt would fail as a transport error.
            api_url: "http://127.0.0.1:9/".to_string(),
            jwt: jwt.map(str::to_string),
            ..ContentStoreConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_io() {
        let store = PinataStore::new(&config(None), reqwest::Client::new());
        assert!(!store.has_credential());
        let err = store
            .upload(UploadFile::new("article.html", "x", "text/html"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingCredential(_)));
        assert!(err.to_string().contains(PINATA_JWT_ENV_VAR));
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let store = PinataStore::new(&config(Some("  ")), reqwest::Client::new());
        assert!(!store.has_credential());
    }

    #[test]
    fn test_endpoint_and_debug_redaction() {
        let store = PinataStore::new(&config(Some("secret-jwt")), reqwest::Client::new());
        assert_eq!(store.endpoint, "http://127.0.0.1:9/pinning/pinFileToIPFS");
        let debug = format!("{:?}", store);
        assert!(!debug.contains("secret-jwt"));
        assert!(debug.contains("has_credential: true"));
    }

    #[test]
    fn test_error_body_shapes() {
        let detailed: ApiErrorBody =
            serde_json::from_str(r#"{"error":{"reason":"INVALID","details":"bad file"}}"#).unwrap();
        assert_eq!(detailed.into_message(), "bad file");

        let plain: ApiErrorBody = serde_json::from_str(r#"{"error":"Invalid token"}"#).unwrap();
        assert_eq!(plain.into_message(), "Invalid token");

        let message: ApiErrorBody = serde_json::from_str(r#"{"message":"slow down"}"#).unwrap();
        assert_eq!(message.into_message(), "slow down");

        assert_eq!(ApiErrorBody::default().into_message(), "Unknown error");
    }
}
