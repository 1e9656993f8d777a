/// Upload validation errors. Messages are shown to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no file part")]
    MissingFile,

    #[error("no file selected")]
    EmptyFilename,

    #[error("unsupported file type")]
    UnsupportedFileType { extension: Option<String> },
}

/// Extension allow-list check
///
/// Only the declared filename is inspected here; the real content type is
/// decided later by the sniffer.
#[derive(Debug, Clone)]
pub struct ExtensionValidator {
    allowed_extensions: Vec<String>,
}

impl ExtensionValidator {
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Whether the text after the last `.` is on the allow-list (case-insensitive).
    pub fn is_allowed(&self, filename: &str) -> bool {
        extension_of(filename)
            .map(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
            .unwrap_or(false)
    }

    pub fn validate(&self, filename: &str) -> Result<(), ValidationError> {
        if self.is_allowed(filename) {
            return Ok(());
        }

        let extension = extension_of(filename);
        tracing::debug!(
            filename = %filename,
            extension = ?extension,
            allowed = ?self.allowed_extensions,
            "Rejected upload extension"
        );
        Err(ValidationError::UnsupportedFileType { extension })
    }
}

/// Lowercased substring after the last `.`, if the name has one.
fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}
