//! Types for the upload pipeline.

use bytes::Bytes;
use serde::Serialize;

/// File as received from the transport, before validation.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Success descriptor returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Name to pass to the download endpoint
    pub filename: String,
}

impl UploadOutcome {
    pub(crate) fn new(original_size: u64, compressed_size: u64, filename: String) -> Self {
        Self {
            success: true,
            original_size,
            compressed_size,
            filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_json_shape() {
        let outcome = UploadOutcome::new(9, 131, "compressed_report.csv.zip".to_string());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "original_size": 9,
                "compressed_size": 131,
                "filename": "compressed_report.csv.zip"
            })
        );
    }
}
