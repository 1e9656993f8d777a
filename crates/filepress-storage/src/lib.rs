//! Filepress Storage Library
//!
//! This crate provides the storage abstraction used by the upload pipeline and
//! a local filesystem implementation of it.
//!
//! # Storage key format
//!
//! The storage root is a single flat directory and the filename *is* the key.
//! Keys must be one path component: no `/`, no `\`, no `..`. Key checking is
//! centralized in the `keys` module so every backend rejects the same input.

pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

pub use keys::is_flat_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
