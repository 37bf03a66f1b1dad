//! Key validation.

use crate::error::{CacheError, Result};

/// Returns true if every character is an ASCII letter, digit, `_` or `-`.
///
/// The empty string is valid.
pub fn is_valid_key(key: &str) -> bool {
    key.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}
