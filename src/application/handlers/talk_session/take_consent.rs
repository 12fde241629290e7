//! TakeConsentHandler - records a user's consent to session restrictions.

use std::sync::Arc;

use crate::application::services::ConsentService;
use crate::domain::foundation::{CommandMetadata, TalkSessionId};
use crate::domain::talk_session::TalkSessionError;

/// Command to consent to a session's restrictions.
#[derive(Debug, Clone)]
pub struct TakeConsentCommand {
    pub talk_session_id: TalkSessionId,
}

/// Handler for taking consent.
pub struct TakeConsentHandler {
    consent: Arc<ConsentService>,
}

impl TakeConsentHandler {
    pub fn new(consent: Arc<ConsentService>) -> Self {
        Self { consent }
    }

    pub async fn handle(
        &self,
        cmd: TakeConsentCommand,
        metadata: CommandMetadata,
    ) -> Result<(), TalkSessionError> {
        self.consent
            .take_consent(cmd.talk_session_id, metadata.user_id)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConsentRepository, InMemoryTalkSessionRepository};
    use crate::domain::foundation::{SystemClock, Timestamp, UserId};
    use crate::domain::talk_session::TalkSession;
    use crate::ports::TalkSessionRepository as _;

    async fn handler_with_session(restrictions: Vec<String>) -> (TakeConsentHandler, TalkSessionId)
    {
        let talk_sessions: Arc<InMemoryTalkSessionRepository> =
            Arc::new(InMemoryTalkSessionRepository::new());
        let now = Timestamp::now();
        let mut session = TalkSession::new(
            TalkSessionId::new(),
            UserId::new(),
            "theme".to_string(),
            None,
            None,
            now.plus_hours(24),
            None,
            None,
            None,
            now,
        )
        .unwrap();
        session.update_restrictions(restrictions).unwrap();
        let id = session.id();
        talk_sessions.create(&session).await.unwrap();

        let consent = Arc::new(ConsentService::new(
            Arc::new(InMemoryConsentRepository::new()),
            talk_sessions,
            Arc::new(SystemClock),
        ));
        (TakeConsentHandler::new(consent), id)
    }

    #[tokio::test]
    async fn consent_is_recorded_once() {
        let (handler, session_id) =
            handler_with_session(vec!["auth.register".to_string()]).await;
        let metadata = CommandMetadata::test_fixture();

        handler
            .handle(
                TakeConsentCommand {
                    talk_session_id: session_id,
                },
                metadata.clone(),
            )
            .await
            .unwrap();

        let err = handler
            .handle(
                TakeConsentCommand {
                    talk_session_id: session_id,
                },
                metadata,
            )
            .await
            .unwrap_err();
        assert_eq!(err, TalkSessionError::AlreadyConsented);
    }

    #[tokio::test]
    async fn unrestricted_session_reports_already_consented() {
        let (handler, session_id) = handler_with_session(vec![]).await;
        let err = handler
            .handle(
                TakeConsentCommand {
                    talk_session_id: session_id,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TalkSessionError::AlreadyConsented);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let (handler, _) = handler_with_session(vec![]).await;
        let absent = TalkSessionId::new();
        let err = handler
            .handle(
                TakeConsentCommand {
                    talk_session_id: absent,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TalkSessionError::NotFound(absent));
    }
}
