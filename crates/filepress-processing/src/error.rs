use filepress_storage::StorageError;

use crate::validator::ValidationError;

/// Failures while sniffing or compressing a stored artifact
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// The stored artifact disappeared between write and processing.
    #[error("File not found: {0}")]
    SourceMissing(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Failed to build archive: {0}")]
    Archive(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Compression task failed: {0}")]
    TaskFailed(String),
}

impl From<zip::result::ZipError> for ProcessingError {
    fn from(err: zip::result::ZipError) -> Self {
        ProcessingError::Archive(err.to_string())
    }
}

/// Outcome of a failed upload, by the stage that failed
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error during compression: {0}")]
    Processing(#[source] ProcessingError),

    #[error("Internal upload failure: {0:#}")]
    Internal(anyhow::Error),
}

impl UploadError {
    pub(crate) fn internal(err: impl Into<anyhow::Error>, context: &'static str) -> Self {
        UploadError::Internal(err.into().context(context))
    }
}
