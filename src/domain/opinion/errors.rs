//! Opinion module errors.

use crate::domain::foundation::{DomainError, ErrorCode, OpinionId};

/// Errors from opinion submission and moderation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum OpinionError {
    /// Opinion was not found.
    NotFound(OpinionId),
    /// The owning talk session was not found.
    ///
    /// Also answers non-owners in the report-resolution path, so session
    /// existence is never leaked to them.
    TalkSessionNotFound,
    /// The session has already finished; no further posts accepted.
    SessionFinished,
    /// The caller may not participate in this session.
    AccessDenied(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl OpinionError {
    pub fn not_found(id: OpinionId) -> Self {
        OpinionError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OpinionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        OpinionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OpinionError::NotFound(_) => ErrorCode::OpinionNotFound,
            OpinionError::TalkSessionNotFound => ErrorCode::TalkSessionNotFound,
            OpinionError::SessionFinished => ErrorCode::SessionFinished,
            OpinionError::AccessDenied(_) => ErrorCode::Forbidden,
            OpinionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            OpinionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            OpinionError::NotFound(id) => format!("Opinion not found: {}", id),
            OpinionError::TalkSessionNotFound => "Talk session not found".to_string(),
            OpinionError::SessionFinished => {
                "Talk session has already finished".to_string()
            }
            OpinionError::AccessDenied(reason) => reason.clone(),
            OpinionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            OpinionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for OpinionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OpinionError {}

impl From<DomainError> for OpinionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::TalkSessionNotFound => OpinionError::TalkSessionNotFound,
            ErrorCode::SessionFinished => OpinionError::SessionFinished,
            ErrorCode::Forbidden
            | ErrorCode::RestrictionNotSatisfied
            | ErrorCode::ConsentRequired
            | ErrorCode::UserNotFound => OpinionError::AccessDenied(err.message),
            ErrorCode::ValidationFailed | ErrorCode::InvalidReportStatus => {
                OpinionError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => OpinionError::Infrastructure(err.message),
        }
    }
}
