//! In-process content-addressed store.
//!
//! Identifiers are the hex SHA-256 of the uploaded bytes, so identical
//! uploads map to the same entry and re-uploading is harmless.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::observability::metrics;
use crate::storage::{ContentId, ContentStore, StoreError, UploadFile};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Content store kept in memory. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<ContentId, StoredObject>>>,
    uploads: Arc<AtomicUsize>,
    /// When set, every upload of a file with this name fails.
    fail_on: Arc<Mutex<Option<(String, StoreError)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload of a file called `name` fail with `err`.
    pub fn fail_uploads_named(&self, name: &str, err: StoreError) {
        if let Ok(mut slot) = self.fail_on.lock() {
            *slot = Some((name.to_string(), err));
        }
    }

    /// Stop injecting failures.
    pub fn clear_failures(&self) {
        if let Ok(mut slot) = self.fail_on.lock() {
            *slot = None;
        }
    }

    /// Look up an object by identifier.
    pub fn get(&self, id: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(&ContentId::new(id)).cloned())
    }

    /// Number of distinct objects stored.
    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of upload calls that succeeded, including duplicates.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    fn injected_failure(&self, name: &str) -> Option<StoreError> {
        let slot = self.fail_on.lock().ok()?;
        let (target, err) = slot.as_ref()?;
        if target != name {
            return None;
        }
        Some(err.clone())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn upload(&self, file: UploadFile) -> Result<ContentId, StoreError> {
        if let Some(err) = self.injected_failure(&file.name) {
            metrics::record_upload("rejected", 0);
            return Err(err);
        }

        let id = ContentId::new(hex::encode(Sha256::digest(&file.bytes)));
        let size = file.bytes.len();
        {
            let mut objects = self
                .objects
                .lock()
                .map_err(|_| StoreError::Transport("memory store poisoned".to_string()))?;
            objects.entry(id.clone()).or_insert(StoredObject {
                name: file.name,
                mime_type: file.mime_type,
                bytes: file.bytes,
            });
        }
        self.uploads.fetch_add(1, Ordering::SeqCst);
        metrics::record_upload("ok", size);
        tracing::debug!(cid = %id, bytes = size, "Stored object in memory");
        Ok(id)
    }
}
