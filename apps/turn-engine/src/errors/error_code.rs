//! Error codes for the turn engine.
//!
//! Every failure surfaced by a service carries one of these codes. Add new
//! codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes, rendered as SCREAMING_SNAKE_CASE strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Unknown entity-type tag
    InvalidArgument,
    /// Millisecond timestamp could not be parsed
    InvalidTimestamp,
    /// Game has no resolvable current step
    NoCurrentStep,
    /// Invitation targets a different kind of entity
    InvitationKindMismatch,
    /// General validation error
    ValidationError,

    // Resource not found
    PlayerNotFound,
    GameNotFound,
    GroupNotFound,
    StepNotFound,
    GamerNotFound,
    InvitationNotFound,
    CharacterNotFound,
    AbilityNotFound,
    /// General not found error
    NotFound,

    // State conflicts
    InvitationAlreadyAccepted,
    InvitationAlreadyDeclined,
    GroupFull,
    /// General conflict
    Conflict,

    // Store / infrastructure
    StoreUnavailable,
    StoreWriteFailed,
    /// Stored data did not match the expected schema
    InvalidType,
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Canonical string representation of this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidTimestamp => "INVALID_TIMESTAMP",
            Self::NoCurrentStep => "NO_CURRENT_STEP",
            Self::InvitationKindMismatch => "INVITATION_KIND_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::StepNotFound => "STEP_NOT_FOUND",
            Self::GamerNotFound => "GAMER_NOT_FOUND",
            Self::InvitationNotFound => "INVITATION_NOT_FOUND",
            Self::CharacterNotFound => "CHARACTER_NOT_FOUND",
            Self::AbilityNotFound => "ABILITY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::InvitationAlreadyAccepted => "INVITATION_ALREADY_ACCEPTED",
            Self::InvitationAlreadyDeclined => "INVITATION_ALREADY_DECLINED",
            Self::GroupFull => "GROUP_FULL",
            Self::Conflict => "CONFLICT",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreWriteFailed => "STORE_WRITE_FAILED",
            Self::InvalidType => "INVALID_TYPE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
