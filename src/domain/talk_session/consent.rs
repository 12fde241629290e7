//! Per-user consent to a session's participation restrictions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TalkSessionId, Timestamp, UserId, ValidationError};

/// A user's acknowledgment of a session's restriction list.
///
/// At most one consent exists per (session, user). Sessions without
/// restrictions never store consents; consent is implicit for everyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkSessionConsent {
    talk_session_id: TalkSessionId,
    user_id: UserId,
    consented_at: Timestamp,
    /// Snapshot of the restriction keys acknowledged at consent time.
    restrictions: Vec<String>,
}

impl TalkSessionConsent {
    /// Creates a consent record.
    ///
    /// # Errors
    ///
    /// Rejects an empty restriction list; unrestricted sessions have
    /// nothing to consent to and store no row.
    pub fn new(
        talk_session_id: TalkSessionId,
        user_id: UserId,
        consented_at: Timestamp,
        restrictions: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if restrictions.is_empty() {
            return Err(ValidationError::empty_field("restrictions"));
        }
        Ok(Self {
            talk_session_id,
            user_id,
            consented_at,
            restrictions,
        })
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn consented_at(&self) -> Timestamp {
        self.consented_at
    }

    pub fn restrictions(&self) -> &[String] {
        &self.restrictions
    }
}
