//! Filepress Core Library
//!
//! Shared configuration and error types used by every other filepress crate.
//! Nothing in here touches the filesystem or the network.

pub mod config;
pub mod error;

pub use config::{Config, LogFormat, DEFAULT_ALLOWED_EXTENSIONS};
pub use error::{AppError, ErrorMetadata, LogLevel};
