//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The upload pipeline only ever talks to this trait, so the local directory
/// backend can be replaced by another one without touching pipeline logic.
///
/// **Key format:** keys are flat filenames directly under the storage root.
/// See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, replacing any existing entry
    async fn write(&self, key: &str, data: &[u8]) -> StorageResult<()>;

    /// Read the full content stored under `key`
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an entry exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the size in bytes of an entry, if it exists.
    async fn content_length(&self, key: &str) -> StorageResult<u64>;

    /// Verify the backend is reachable and writable
    async fn health_check(&self) -> StorageResult<()>;
}
