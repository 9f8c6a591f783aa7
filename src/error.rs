//! Workflow error taxonomy.
//!
//! Every failure of a publish or mint attempt is mapped onto one of four
//! categories. None of them is fatal to the process: each is scoped to the
//! attempt that produced it and leaves the orchestrator in a retryable state.

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::minting::MintFailure;
use crate::storage::StoreError;
use crate::workflow::StateError;

/// Errors surfaced by the publish-and-mint workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required credential or setting is missing. Raised before any I/O.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required draft field is empty, the wallet is not connected, or the
    /// requested action is not valid in the current state.
    #[error("{0}")]
    Validation(String),

    /// The content store or metadata uploader rejected an upload.
    #[error("{0}")]
    Upload(String),

    /// The coin minter failed. Display is the user-facing message.
    #[error("{0}")]
    Mint(#[from] MintFailure),
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingCredential(msg) => WorkflowError::Configuration(msg),
            other => WorkflowError::Upload(other.to_string()),
        }
    }
}

impl From<MetadataError> for WorkflowError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Store(store) => store.into(),
            invalid @ MetadataError::Invalid(_) => WorkflowError::Validation(invalid.to_string()),
            MetadataError::Encode(e) => WorkflowError::Upload(format!("Metadata encoding failed: {}", e)),
        }
    }
}

impl From<StateError> for WorkflowError {
    fn from(err: StateError) -> Self {
        WorkflowError::Validation(err.to_string())
    }
}

impl WorkflowError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::Configuration(_) => "configuration",
            WorkflowError::Validation(_) => "validation",
            WorkflowError::Upload(_) => "upload",
            WorkflowError::Mint(_) => "mint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_maps_to_configuration() {
        let err: WorkflowError = StoreError::MissingCredential("PINATA_JWT is not set".into()).into();
        assert!(matches!(err, WorkflowError::Configuration(_)));
        assert_eq!(err.kind(), "configuration");
        assert!(err.to_string().contains("PINATA_JWT"));
    }

    #[test]
    fn test_rejection_maps_to_upload_verbatim() {
        let err: WorkflowError = StoreError::Rejected {
            status: 400,
            message: "Invalid file".into(),
        }
        .into();
        assert!(matches!(err, WorkflowError::Upload(_)));
        assert_eq!(err.to_string(), "Content store rejected upload (400): Invalid file");
    }

    #[test]
    fn test_invalid_metadata_keeps_prefix() {
        let err: WorkflowError = MetadataError::Invalid("symbol is required".into()).into();
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid metadata: symbol is required");
    }

    #[test]
    fn test_metadata_store_error_unwraps() {
        let err: WorkflowError =
            MetadataError::Store(StoreError::MissingCredential("no jwt".into())).into();
        assert!(matches!(err, WorkflowError::Configuration(_)));
    }
}
