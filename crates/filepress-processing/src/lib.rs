//! Filepress Processing Library
//!
//! The ingestion and compression pipeline: extension validation, content
//! sniffing, strategy selection between image re-encoding and a single-entry
//! zip archive, and the storage orchestration that guarantees no raw or
//! partial artifact outlives a failed request.

pub mod compression;
pub mod error;
pub mod filename;
pub mod sniff;
pub mod upload;
pub mod validator;

pub use compression::{CompressionStrategy, Compressor, DEFAULT_IMAGE_QUALITY};
pub use error::{ProcessingError, UploadError};
pub use filename::{compressed_filename, sanitize_filename};
pub use sniff::{ContentSniffer, SniffedType};
pub use upload::{PipelineConfig, UploadOutcome, UploadPipeline, UploadedFile};
pub use validator::{ExtensionValidator, ValidationError};
