//! Multipart helpers for the upload handler

use axum::extract::Multipart;
use filepress_processing::UploadedFile;

use crate::error::HttpAppError;

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Pull the first file part named `file` out of the form.
///
/// Parts without a filename are plain form values, not files, and are
/// skipped. Returns `None` when no file part is present.
pub async fn extract_file_field(
    mut multipart: Multipart,
) -> Result<Option<UploadedFile>, HttpAppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await?;
        tracing::debug!(filename = %filename, size_bytes = data.len(), "Received file part");
        return Ok(Some(UploadedFile::new(filename, data)));
    }

    Ok(None)
}
