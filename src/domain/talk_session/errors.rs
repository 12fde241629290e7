//! TalkSession module errors.

use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId};

/// Errors from talk session operations (create/edit/consent/conclude).
#[derive(Debug, Clone, PartialEq)]
pub enum TalkSessionError {
    /// Talk session was not found.
    NotFound(TalkSessionId),
    /// User was not found.
    UserNotFound,
    /// Caller is not the session owner.
    Forbidden,
    /// The session has not reached its scheduled end yet.
    NotFinished,
    /// The session has already finished.
    Finished,
    /// A consent record for this (session, user) already exists.
    AlreadyConsented,
    /// The session already has a conclusion.
    ConclusionAlreadySet,
    /// The user does not satisfy the named restriction keys.
    RestrictionNotSatisfied(Vec<String>),
    /// The user has not consented to the session's restrictions.
    ConsentRequired,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// One or more restriction keys are not in the registry.
    InvalidRestriction(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl TalkSessionError {
    pub fn not_found(id: TalkSessionId) -> Self {
        TalkSessionError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TalkSessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        TalkSessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TalkSessionError::NotFound(_) => ErrorCode::TalkSessionNotFound,
            TalkSessionError::UserNotFound => ErrorCode::UserNotFound,
            TalkSessionError::Forbidden => ErrorCode::Forbidden,
            TalkSessionError::NotFinished => ErrorCode::SessionNotFinished,
            TalkSessionError::Finished => ErrorCode::SessionFinished,
            TalkSessionError::AlreadyConsented => ErrorCode::AlreadyConsented,
            TalkSessionError::ConclusionAlreadySet => ErrorCode::ConclusionAlreadySet,
            TalkSessionError::RestrictionNotSatisfied(_) => ErrorCode::RestrictionNotSatisfied,
            TalkSessionError::ConsentRequired => ErrorCode::ConsentRequired,
            TalkSessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TalkSessionError::InvalidRestriction(_) => ErrorCode::InvalidRestrictionAttribute,
            TalkSessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TalkSessionError::NotFound(id) => format!("Talk session not found: {}", id),
            TalkSessionError::UserNotFound => "User not found".to_string(),
            TalkSessionError::Forbidden => "Permission denied".to_string(),
            TalkSessionError::NotFinished => {
                "Talk session has not finished yet".to_string()
            }
            TalkSessionError::Finished => "Talk session has already finished".to_string(),
            TalkSessionError::AlreadyConsented => {
                "Consent has already been taken for this talk session".to_string()
            }
            TalkSessionError::ConclusionAlreadySet => {
                "Talk session already has a conclusion".to_string()
            }
            TalkSessionError::RestrictionNotSatisfied(keys) => {
                format!("Restrictions not satisfied: {}", keys.join(", "))
            }
            TalkSessionError::ConsentRequired => {
                "Consent to the session's restrictions is required".to_string()
            }
            TalkSessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TalkSessionError::InvalidRestriction(msg) => msg.clone(),
            TalkSessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TalkSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TalkSessionError {}

impl From<DomainError> for TalkSessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::TalkSessionNotFound => err
                .details
                .get("talk_session_id")
                .and_then(|id| id.parse().ok())
                .map(TalkSessionError::NotFound)
                // without an id there is nothing safe to leak
                .unwrap_or(TalkSessionError::Forbidden),
            ErrorCode::Forbidden => TalkSessionError::Forbidden,
            ErrorCode::UserNotFound => TalkSessionError::UserNotFound,
            ErrorCode::SessionNotFinished => TalkSessionError::NotFinished,
            ErrorCode::SessionFinished => TalkSessionError::Finished,
            ErrorCode::AlreadyConsented => TalkSessionError::AlreadyConsented,
            ErrorCode::ConclusionAlreadySet => TalkSessionError::ConclusionAlreadySet,
            ErrorCode::ConsentRequired => TalkSessionError::ConsentRequired,
            ErrorCode::RestrictionNotSatisfied => TalkSessionError::RestrictionNotSatisfied(
                err.details
                    .get("unmet_keys")
                    .map(|keys| keys.split(',').map(String::from).collect())
                    .unwrap_or_default(),
            ),
            ErrorCode::InvalidRestrictionAttribute => {
                TalkSessionError::InvalidRestriction(err.message)
            }
            ErrorCode::ValidationFailed | ErrorCode::InvalidScheduledEndTime => {
                TalkSessionError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => TalkSessionError::Infrastructure(err.message),
        }
    }
}
