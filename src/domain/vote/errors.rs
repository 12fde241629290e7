//! Vote module errors.

use crate::domain::foundation::{DomainError, ErrorCode, OpinionId, TalkSessionId};

/// Errors from the vote-casting operation.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteError {
    /// The target opinion was not found.
    OpinionNotFound(OpinionId),
    /// The owning talk session was not found.
    TalkSessionNotFound(TalkSessionId),
    /// The session has finished; no further votes accepted.
    SessionFinished,
    /// The caller may not participate in this session.
    AccessDenied(String),
    /// The caller has already voted on this opinion.
    AlreadyVoted,
    /// Validation failed (e.g. casting `unvoted`).
    ValidationFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl VoteError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        VoteError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VoteError::OpinionNotFound(_) => ErrorCode::OpinionNotFound,
            VoteError::TalkSessionNotFound(_) => ErrorCode::TalkSessionNotFound,
            VoteError::SessionFinished => ErrorCode::SessionFinished,
            VoteError::AccessDenied(_) => ErrorCode::Forbidden,
            VoteError::AlreadyVoted => ErrorCode::AlreadyVoted,
            VoteError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            VoteError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            VoteError::OpinionNotFound(id) => format!("Opinion not found: {}", id),
            VoteError::TalkSessionNotFound(id) => format!("Talk session not found: {}", id),
            VoteError::SessionFinished => "Talk session has already finished".to_string(),
            VoteError::AccessDenied(reason) => reason.clone(),
            VoteError::AlreadyVoted => "This opinion has already been voted on".to_string(),
            VoteError::ValidationFailed(msg) => msg.clone(),
            VoteError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for VoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for VoteError {}

impl From<DomainError> for VoteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadyVoted => VoteError::AlreadyVoted,
            ErrorCode::SessionFinished => VoteError::SessionFinished,
            ErrorCode::Forbidden
            | ErrorCode::RestrictionNotSatisfied
            | ErrorCode::ConsentRequired
            | ErrorCode::UserNotFound => VoteError::AccessDenied(err.message),
            ErrorCode::ValidationFailed | ErrorCode::InvalidVoteType => {
                VoteError::ValidationFailed(err.message)
            }
            _ => VoteError::Infrastructure(err.message),
        }
    }
}
