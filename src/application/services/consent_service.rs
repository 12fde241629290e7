//! Consent service - gates participation on restriction acknowledgment.

use std::sync::Arc;

use crate::domain::foundation::{Clock, DomainError, ErrorCode, TalkSessionId, UserId};
use crate::domain::talk_session::{TalkSession, TalkSessionConsent};
use crate::ports::{ConsentRepository, TalkSessionRepository};

/// Decides whether a user has acknowledged a session's restrictions and
/// records new acknowledgments.
pub struct ConsentService {
    consents: Arc<dyn ConsentRepository>,
    talk_sessions: Arc<dyn TalkSessionRepository>,
    clock: Arc<dyn Clock>,
}

impl ConsentService {
    pub fn new(
        consents: Arc<dyn ConsentRepository>,
        talk_sessions: Arc<dyn TalkSessionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            consents,
            talk_sessions,
            clock,
        }
    }

    /// Whether the user has consented to the session's restrictions.
    ///
    /// Short-circuits to `true` when the session declares no
    /// restrictions; there is nothing to consent to. A missing consent
    /// row is "not consented", never an error.
    pub async fn has_consented(
        &self,
        talk_session_id: TalkSessionId,
        user_id: UserId,
    ) -> Result<bool, DomainError> {
        let session = self.load_session(talk_session_id).await?;
        self.has_consented_to(&session, user_id).await
    }

    /// Same check against an already-loaded session.
    pub async fn has_consented_to(
        &self,
        session: &TalkSession,
        user_id: UserId,
    ) -> Result<bool, DomainError> {
        if session.restrictions().is_empty() {
            return Ok(true);
        }
        let consent = self
            .consents
            .find_by_talk_session_and_user(session.id(), user_id)
            .await?;
        Ok(consent.is_some())
    }

    /// Records the user's consent.
    ///
    /// # Errors
    ///
    /// - `TalkSessionNotFound` if the session doesn't exist
    /// - `AlreadyConsented` on a repeat acknowledgment (including
    ///   unrestricted sessions, where consent is implicit)
    pub async fn take_consent(
        &self,
        talk_session_id: TalkSessionId,
        user_id: UserId,
    ) -> Result<(), DomainError> {
        let session = self.load_session(talk_session_id).await?;

        if self.has_consented_to(&session, user_id).await? {
            return Err(DomainError::new(
                ErrorCode::AlreadyConsented,
                "Consent has already been taken for this talk session",
            ));
        }

        let consent = TalkSessionConsent::new(
            talk_session_id,
            user_id,
            self.clock.now(),
            session.restrictions().to_vec(),
        )?;
        self.consents.store(&consent).await
    }

    async fn load_session(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<TalkSession, DomainError> {
        self.talk_sessions
            .find_by_id(talk_session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TalkSessionNotFound,
                    format!("Talk session not found: {}", talk_session_id),
                )
                .with_detail("talk_session_id", talk_session_id.to_string())
            })
    }
}
