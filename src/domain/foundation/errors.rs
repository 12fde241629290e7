//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max} characters, got {actual}")]
    BadLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates a character-length validation error.
    pub fn bad_length(field: impl Into<String>, min: usize, max: usize, actual: usize) -> Self {
        ValidationError::BadLength {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidRestrictionAttribute,
    InvalidScheduledEndTime,
    InvalidVoteType,
    InvalidReportStatus,
    InvalidActionStatus,

    // Not found errors
    TalkSessionNotFound,
    OpinionNotFound,
    UserNotFound,
    ActionItemNotFound,
    ConclusionNotFound,
    AnalysisReportNotFound,

    // Conflict / already-done errors
    AlreadyVoted,
    AlreadyConsented,
    ConclusionAlreadySet,
    SessionFinished,
    SessionNotFinished,
    SessionAlreadyStarted,
    SessionAlreadyEnded,

    // Authorization errors
    Forbidden,
    RestrictionNotSatisfied,
    ConsentRequired,

    // Infrastructure errors
    DatabaseError,
    ExternalServiceError,
    InternalError,
}

impl ErrorCode {
    /// Whether this code represents a caller conflict (409-equivalent).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ErrorCode::AlreadyVoted
                | ErrorCode::AlreadyConsented
                | ErrorCode::ConclusionAlreadySet
                | ErrorCode::SessionFinished
                | ErrorCode::SessionAlreadyStarted
                | ErrorCode::SessionAlreadyEnded
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidRestrictionAttribute => "INVALID_RESTRICTION_ATTRIBUTE",
            ErrorCode::InvalidScheduledEndTime => "INVALID_SCHEDULED_END_TIME",
            ErrorCode::InvalidVoteType => "INVALID_VOTE_TYPE",
            ErrorCode::InvalidReportStatus => "INVALID_REPORT_STATUS",
            ErrorCode::InvalidActionStatus => "INVALID_ACTION_STATUS",
            ErrorCode::TalkSessionNotFound => "TALK_SESSION_NOT_FOUND",
            ErrorCode::OpinionNotFound => "OPINION_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::ActionItemNotFound => "ACTION_ITEM_NOT_FOUND",
            ErrorCode::ConclusionNotFound => "CONCLUSION_NOT_FOUND",
            ErrorCode::AnalysisReportNotFound => "ANALYSIS_REPORT_NOT_FOUND",
            ErrorCode::AlreadyVoted => "ALREADY_VOTED",
            ErrorCode::AlreadyConsented => "ALREADY_CONSENTED",
            ErrorCode::ConclusionAlreadySet => "CONCLUSION_ALREADY_SET",
            ErrorCode::SessionFinished => "SESSION_FINISHED",
            ErrorCode::SessionNotFinished => "SESSION_NOT_FINISHED",
            ErrorCode::SessionAlreadyStarted => "SESSION_ALREADY_STARTED",
            ErrorCode::SessionAlreadyEnded => "SESSION_ALREADY_ENDED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::RestrictionNotSatisfied => "RESTRICTION_NOT_SATISFIED",
            ErrorCode::ConsentRequired => "CONSENT_REQUIRED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_bad_length_displays_correctly() {
        let err = ValidationError::bad_length("content", 5, 140, 3);
        assert_eq!(
            format!("{}", err),
            "Field 'content' must be between 5 and 140 characters, got 3"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::TalkSessionNotFound, "talk session not found");
        assert_eq!(
            format!("{}", err),
            "[TALK_SESSION_NOT_FOUND] talk session not found"
        );
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("theme", "theme too long").with_detail("max", "100");

        assert_eq!(err.details.get("field"), Some(&"theme".to_string()));
        assert_eq!(err.details.get("max"), Some(&"100".to_string()));
    }

    #[test]
    fn conflict_codes_are_classified() {
        assert!(ErrorCode::AlreadyVoted.is_conflict());
        assert!(ErrorCode::SessionFinished.is_conflict());
        assert!(!ErrorCode::TalkSessionNotFound.is_conflict());
        assert!(!ErrorCode::DatabaseError.is_conflict());
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("theme").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
