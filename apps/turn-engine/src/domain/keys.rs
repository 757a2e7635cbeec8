//! Record bins double as store path segments, so a bin must name exactly
//! one child node.

use crate::errors::domain::{DomainError, ValidationKind};

/// Characters the tree store reserves in keys.
const RESERVED: [char; 6] = ['/', '.', '#', '$', '[', ']'];

/// Fail with `InvalidArgument` unless `key` is a single, non-empty segment.
pub fn ensure_key(what: &str, key: &str) -> Result<(), DomainError> {
    if key.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidArgument,
            format!("{what} id must not be empty"),
        ));
    }
    if let Some(c) = key
        .chars()
        .find(|c| RESERVED.contains(c) || c.is_control())
    {
        return Err(DomainError::validation(
            ValidationKind::InvalidArgument,
            format!("{what} id {key:?} contains reserved character {c:?}"),
        ));
    }
    Ok(())
}
