//! Conclusion entity - the owner's closing statement for a session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TalkSessionId, Timestamp, UserId, ValidationError};

/// The single closing statement a session owner writes after the
/// session finishes. Exactly one per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conclusion {
    talk_session_id: TalkSessionId,
    created_by: UserId,
    content: String,
    created_at: Timestamp,
}

impl Conclusion {
    /// Creates a conclusion, rejecting empty content.
    pub fn new(
        talk_session_id: TalkSessionId,
        created_by: UserId,
        content: String,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            talk_session_id,
            created_by,
            content,
            created_at,
        })
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Replaces the conclusion text.
    pub fn edit(&mut self, content: String) -> Result<(), ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        self.content = content;
        Ok(())
    }
}
