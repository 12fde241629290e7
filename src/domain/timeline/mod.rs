//! Timeline action items - the owner's post-session action log.

mod errors;

pub use errors::TimelineError;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ActionItemId, DomainError, TalkSessionId, Timestamp, ValidationError,
};

/// Valid action item content length range.
pub const MIN_ACTION_CONTENT_LENGTH: usize = 1;
pub const MAX_ACTION_CONTENT_LENGTH: usize = 40;

/// Progress state of an action item.
///
/// Labels are the Japanese terms shown in the timeline UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    NotStarted,
    InProgress,
    Completed,
    Pending,
    Canceled,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::NotStarted => "未着手",
            ActionStatus::InProgress => "進行中",
            ActionStatus::Completed => "完了",
            ActionStatus::Pending => "保留",
            ActionStatus::Canceled => "中止",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "未着手" => Ok(ActionStatus::NotStarted),
            "進行中" => Ok(ActionStatus::InProgress),
            "完了" => Ok(ActionStatus::Completed),
            "保留" => Ok(ActionStatus::Pending),
            "中止" => Ok(ActionStatus::Canceled),
            other => Err(ValidationError::invalid_format(
                "action_status",
                format!("unknown action status '{}'", other),
            )),
        }
    }
}

/// One entry in a finished session's action timeline.
///
/// # Invariants
///
/// - `content` is 1-40 characters
/// - `sequence` is assigned by the timeline service, never by callers
/// - only mutable while the owning session is finished, owner-only
///   (enforced by the handlers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    id: ActionItemId,
    talk_session_id: TalkSessionId,
    sequence: u32,
    content: String,
    status: ActionStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ActionItem {
    /// Create a new action item.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` on content length violations
    pub fn new(
        id: ActionItemId,
        talk_session_id: TalkSessionId,
        sequence: u32,
        content: String,
        status: ActionStatus,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        Self::validate_content(&content)?;
        Ok(Self {
            id,
            talk_session_id,
            sequence,
            content,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an action item from persistence.
    pub fn reconstitute(
        id: ActionItemId,
        talk_session_id: TalkSessionId,
        sequence: u32,
        content: String,
        status: ActionStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            talk_session_id,
            sequence,
            content,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ActionItemId {
        self.id
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Replace the content, re-validating its length.
    pub fn update_content(&mut self, content: String, now: Timestamp) -> Result<(), DomainError> {
        Self::validate_content(&content)?;
        self.content = content;
        self.updated_at = now;
        Ok(())
    }

    pub fn update_status(&mut self, status: ActionStatus, now: Timestamp) {
        self.status = status;
        self.updated_at = now;
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        let len = content.chars().count();
        if !(MIN_ACTION_CONTENT_LENGTH..=MAX_ACTION_CONTENT_LENGTH).contains(&len) {
            return Err(DomainError::validation(
                "content",
                format!(
                    "content must be between {} and {} characters, got {}",
                    MIN_ACTION_CONTENT_LENGTH, MAX_ACTION_CONTENT_LENGTH, len
                ),
            ));
        }
        Ok(())
    }
}
