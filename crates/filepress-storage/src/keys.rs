//! Shared key checks for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Whether `key` names a single entry directly under the storage root.
pub fn is_flat_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && !key.contains("..")
        && !key.contains('/')
        && !key.contains('\\')
        && !key.contains('\0')
}

pub(crate) fn ensure_flat_key(key: &str) -> StorageResult<()> {
    if is_flat_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(format!(
            "Storage key must be a single path component: {:?}",
            key
        )))
    }
}
