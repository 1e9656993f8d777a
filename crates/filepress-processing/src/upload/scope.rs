//! Request-scoped ownership of the artifacts an upload writes.
//!
//! Keys are registered *before* they are written so a partial write is still
//! cleaned up. `commit` deletes the raw artifact and releases the compressed
//! one; `rollback` deletes both. A scope dropped without either (the request
//! future was cancelled) spawns the rollback on the current runtime.

use std::sync::Arc;

use filepress_storage::{Storage, StorageResult};

pub(crate) struct ArtifactScope {
    storage: Arc<dyn Storage>,
    raw: Option<String>,
    compressed: Option<String>,
}

impl ArtifactScope {
    pub(crate) fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            raw: None,
            compressed: None,
        }
    }

    pub(crate) fn track_raw(&mut self, key: &str) {
        self.raw = Some(key.to_string());
    }

    pub(crate) fn track_compressed(&mut self, key: &str) {
        self.compressed = Some(key.to_string());
    }

    /// Delete the raw artifact and keep the compressed one.
    ///
    /// On error nothing is released, so a following `rollback` still removes both.
    pub(crate) async fn commit(&mut self) -> StorageResult<()> {
        if let Some(raw) = self.raw.as_deref() {
            self.storage.delete(raw).await?;
        }
        self.raw = None;
        self.compressed = None;
        Ok(())
    }

    /// Delete every registered artifact. Failures are logged, not returned.
    pub(crate) async fn rollback(mut self) {
        let keys = self.take_keys();
        delete_all(self.storage.as_ref(), &keys).await;
    }

    fn take_keys(&mut self) -> Vec<String> {
        self.raw.take().into_iter().chain(self.compressed.take()).collect()
    }
}

impl Drop for ArtifactScope {
    fn drop(&mut self) {
        let keys = self.take_keys();
        if keys.is_empty() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let storage = self.storage.clone();
                handle.spawn(async move {
                    delete_all(storage.as_ref(), &keys).await;
                });
            }
            Err(_) => {
                tracing::warn!(keys = ?keys, "Upload scope dropped outside a runtime; artifacts left behind");
            }
        }
    }
}

async fn delete_all(storage: &dyn Storage, keys: &[String]) {
    for key in keys {
        match storage.delete(key).await {
            Ok(()) => tracing::debug!(key = %key, "Removed upload artifact"),
            Err(e) => tracing::error!(
                error = %e,
                key = %key,
                "Failed to remove upload artifact during cleanup"
            ),
        }
    }
}
