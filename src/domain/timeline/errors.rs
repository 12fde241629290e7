//! Timeline module errors.

use crate::domain::foundation::{ActionItemId, DomainError, ErrorCode, TalkSessionId};

/// Errors from action item creation and editing.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// Talk session was not found.
    TalkSessionNotFound(TalkSessionId),
    /// Action item was not found.
    ActionItemNotFound(ActionItemId),
    /// The session has not finished; the timeline is not open yet.
    SessionNotFinished,
    /// Caller is not the session owner.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl TimelineError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        TimelineError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TimelineError::TalkSessionNotFound(_) => ErrorCode::TalkSessionNotFound,
            TimelineError::ActionItemNotFound(_) => ErrorCode::ActionItemNotFound,
            TimelineError::SessionNotFinished => ErrorCode::SessionNotFinished,
            TimelineError::Forbidden => ErrorCode::Forbidden,
            TimelineError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TimelineError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TimelineError::TalkSessionNotFound(id) => {
                format!("Talk session not found: {}", id)
            }
            TimelineError::ActionItemNotFound(id) => format!("Action item not found: {}", id),
            TimelineError::SessionNotFinished => {
                "Talk session has not finished yet".to_string()
            }
            TimelineError::Forbidden => "Permission denied".to_string(),
            TimelineError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TimelineError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TimelineError {}

impl From<DomainError> for TimelineError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFinished => TimelineError::SessionNotFinished,
            ErrorCode::Forbidden => TimelineError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::InvalidActionStatus => {
                TimelineError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => TimelineError::Infrastructure(err.message),
        }
    }
}
