//! Upload pipeline: validate → store raw → sniff → compress → store compressed.

mod pipeline;
mod scope;
mod types;

pub use pipeline::{PipelineConfig, UploadPipeline};
pub use types::{UploadOutcome, UploadedFile};
