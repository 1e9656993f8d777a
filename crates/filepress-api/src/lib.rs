//! Filepress API Library
//!
//! HTTP surface for the upload pipeline: multipart upload, download of
//! compressed artifacts, and a storage health probe.

mod handlers;
mod utils;

pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
