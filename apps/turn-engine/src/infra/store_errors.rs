//! StoreError -> DomainError translation helpers.
//!
//! Adapters report `StoreError`; repos convert here, and higher layers map
//! `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::adapters::tree::StoreError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Translate a `StoreError` into a `DomainError`.
pub fn map_store_err(e: StoreError) -> DomainError {
    match e {
        StoreError::NotFound { path } => {
            DomainError::not_found(NotFoundKind::Other(path.clone()), format!("no value at {path}"))
        }
        StoreError::Unavailable { detail } => {
            warn!(%detail, "tree store unavailable");
            DomainError::infra(InfraErrorKind::StoreUnavailable, detail)
        }
        StoreError::WriteFailed { path, detail } => {
            warn!(%path, %detail, "tree store write failed");
            DomainError::infra(
                InfraErrorKind::StoreWriteFailed,
                format!("write to {path} failed: {detail}"),
            )
        }
        e @ (StoreError::Decode { .. } | StoreError::Encode { .. }) => {
            error!(error = %e, "stored value does not match schema");
            DomainError::infra(InfraErrorKind::InvalidType, e.to_string())
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        map_store_err(e)
    }
}
