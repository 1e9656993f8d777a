//! Storage manager for a single upload.
//!
//! Runs validate → store raw → sniff → compress → store compressed → delete raw,
//! and guarantees that a failure after the raw write leaves neither artifact
//! behind. Validation failures return before anything touches storage.

use std::sync::Arc;

use filepress_core::Config;
use filepress_storage::{is_flat_key, Storage, StorageError};

use super::scope::ArtifactScope;
use super::types::{UploadOutcome, UploadedFile};
use crate::compression::{Compressor, DEFAULT_IMAGE_QUALITY};
use crate::error::{ProcessingError, UploadError};
use crate::filename::{compressed_filename, sanitize_filename};
use crate::sniff::ContentSniffer;
use crate::validator::{ExtensionValidator, ValidationError};

/// Immutable pipeline settings, fixed at construction.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub allowed_extensions: Vec<String>,
    pub image_quality: u8,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            allowed_extensions: config.allowed_extensions.clone(),
            image_quality: DEFAULT_IMAGE_QUALITY,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Clone)]
pub struct UploadPipeline {
    storage: Arc<dyn Storage>,
    validator: ExtensionValidator,
    compressor: Compressor,
}

impl UploadPipeline {
    pub fn new(storage: Arc<dyn Storage>, config: PipelineConfig) -> Self {
        Self {
            storage,
            validator: ExtensionValidator::new(config.allowed_extensions),
            compressor: Compressor::new(config.image_quality),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Ingest one upload. `None` means the request carried no file field.
    pub async fn ingest(&self, upload: Option<UploadedFile>) -> Result<UploadOutcome, UploadError> {
        let upload = upload.ok_or(ValidationError::MissingFile)?;
        if upload.filename.is_empty() {
            return Err(ValidationError::EmptyFilename.into());
        }
        self.validator.validate(&upload.filename)?;

        let filename = sanitize_filename(&upload.filename);
        let compressed_name = compressed_filename(&filename);

        let mut scope = ArtifactScope::new(self.storage.clone());
        match self
            .store_and_compress(&mut scope, &filename, &compressed_name, &upload.data)
            .await
        {
            Ok(outcome) => {
                tracing::info!(
                    filename = %filename,
                    compressed = %outcome.filename,
                    original_size = outcome.original_size,
                    compressed_size = outcome.compressed_size,
                    "Upload compressed"
                );
                Ok(outcome)
            }
            Err(err) => {
                scope.rollback().await;
                match &err {
                    UploadError::Internal(source) => tracing::error!(
                        filename = %filename,
                        error = ?source,
                        "Unexpected upload failure, artifacts removed"
                    ),
                    other => tracing::warn!(
                        filename = %filename,
                        error = %other,
                        "Upload processing failed, artifacts removed"
                    ),
                }
                Err(err)
            }
        }
    }

    async fn store_and_compress(
        &self,
        scope: &mut ArtifactScope,
        filename: &str,
        compressed_name: &str,
        data: &[u8],
    ) -> Result<UploadOutcome, UploadError> {
        scope.track_raw(filename);
        self.storage
            .write(filename, data)
            .await
            .map_err(|e| UploadError::internal(e, "Failed to store raw upload"))?;

        let original_size = self
            .storage
            .content_length(filename)
            .await
            .map_err(|e| UploadError::internal(e, "Failed to stat raw upload"))?;

        let compressed = self
            .compress_stored(filename)
            .await
            .map_err(UploadError::Processing)?;

        scope.track_compressed(compressed_name);
        self.storage
            .write(compressed_name, &compressed)
            .await
            .map_err(|e| UploadError::Processing(ProcessingError::Storage(e)))?;

        scope
            .commit()
            .await
            .map_err(|e| UploadError::internal(e, "Failed to remove raw upload"))?;

        Ok(UploadOutcome::new(
            original_size,
            compressed.len() as u64,
            compressed_name.to_string(),
        ))
    }

    async fn compress_stored(&self, key: &str) -> Result<Vec<u8>, ProcessingError> {
        let sniffed = ContentSniffer::sniff(self.storage.as_ref(), key).await?;
        self.compressor
            .compress(self.storage.as_ref(), key, &sniffed)
            .await
    }

    /// Fetch a stored artifact by its exact name.
    ///
    /// Names that are not a single flat component are reported as missing
    /// without touching storage.
    pub async fn download(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        if !is_flat_key(filename) {
            tracing::debug!(filename = %filename, "Rejected non-flat download name");
            return Err(StorageError::NotFound(filename.to_string()));
        }
        self.storage.read(filename).await
    }
}
