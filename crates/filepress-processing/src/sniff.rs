//! Content type detection from stored bytes.
//!
//! The declared filename and any client-supplied Content-Type are ignored:
//! the type is decided from magic numbers in the bytes that actually landed
//! in storage. A file called `photo.png` holding text is `text/plain` here.

use std::fmt;

use filepress_storage::{Storage, StorageError};

use crate::error::ProcessingError;

/// Zero-length content.
pub const EMPTY_MIME: &str = "application/x-empty";
/// No signature matched and the bytes read as text.
pub const TEXT_MIME: &str = "text/plain";
/// No signature matched and the bytes are binary.
pub const BINARY_MIME: &str = "application/octet-stream";

/// Content type derived from stored bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffedType {
    pub mime: &'static str,
}

impl SniffedType {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            mime: sniff_bytes(data),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

impl fmt::Display for SniffedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime)
    }
}

/// Detect a MIME type from raw bytes.
pub fn sniff_bytes(data: &[u8]) -> &'static str {
    if data.is_empty() {
        return EMPTY_MIME;
    }

    if let Some(kind) = infer::get(data) {
        return kind.mime_type();
    }

    if looks_like_text(data) {
        TEXT_MIME
    } else {
        BINARY_MIME
    }
}

/// UTF-8 with no control characters besides common whitespace.
fn looks_like_text(data: &[u8]) -> bool {
    match std::str::from_utf8(data) {
        Ok(text) => text
            .chars()
            .all(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r' | '\x0c')),
        Err(_) => false,
    }
}

/// Sniffs artifacts through the storage abstraction
pub struct ContentSniffer;

impl ContentSniffer {
    pub async fn sniff(storage: &dyn Storage, key: &str) -> Result<SniffedType, ProcessingError> {
        let data = storage.read(key).await.map_err(|e| match e {
            StorageError::NotFound(key) => ProcessingError::SourceMissing(key),
            other => ProcessingError::Storage(other),
        })?;

        let sniffed = SniffedType::from_bytes(&data);
        tracing::debug!(key = %key, mime = %sniffed, size_bytes = data.len(), "Sniffed content type");
        Ok(sniffed)
    }
}
