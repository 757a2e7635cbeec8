use thiserror::Error;

use crate::adapters::tree::StoreError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Error returned by engine services and state construction.
///
/// Callers must treat any error as "state may not have changed"; the engine
/// never retries and never rolls back a partially applied sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },
    #[error("Store error: {detail}")]
    Store { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            AppError::Store { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// True when an invitation was already accepted or declined.
    pub fn is_already_terminal(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::InvitationAlreadyAccepted | ErrorCode::InvitationAlreadyDeclined
        )
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        DomainError::from(e).into()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidArgument => ErrorCode::InvalidArgument,
                    ValidationKind::InvalidTimestamp => ErrorCode::InvalidTimestamp,
                    ValidationKind::NoCurrentStep => ErrorCode::NoCurrentStep,
                    ValidationKind::InvitationKindMismatch => ErrorCode::InvitationKindMismatch,
                    _ => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::InvitationAlreadyAccepted => ErrorCode::InvitationAlreadyAccepted,
                    ConflictKind::InvitationAlreadyDeclined => ErrorCode::InvitationAlreadyDeclined,
                    ConflictKind::GroupFull => ErrorCode::GroupFull,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Group => ErrorCode::GroupNotFound,
                    NotFoundKind::Step => ErrorCode::StepNotFound,
                    NotFoundKind::Gamer => ErrorCode::GamerNotFound,
                    NotFoundKind::Invitation => ErrorCode::InvitationNotFound,
                    NotFoundKind::Character => ErrorCode::CharacterNotFound,
                    NotFoundKind::Ability => ErrorCode::AbilityNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::StoreUnavailable => AppError::StoreUnavailable { detail },
                InfraErrorKind::StoreWriteFailed => AppError::Store {
                    code: ErrorCode::StoreWriteFailed,
                    detail,
                },
                InfraErrorKind::InvalidType => AppError::Store {
                    code: ErrorCode::InvalidType,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::internal(detail),
            },
        }
    }
}
