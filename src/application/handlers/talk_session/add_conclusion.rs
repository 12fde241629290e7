//! AddConclusionHandler - the owner's closing statement, one per session.

use std::sync::Arc;

use crate::domain::conclusion::Conclusion;
use crate::domain::foundation::{Clock, CommandMetadata, TalkSessionId};
use crate::domain::talk_session::TalkSessionError;
use crate::ports::{ConclusionRepository, TalkSessionRepository};

/// Command to add a conclusion to a finished talk session.
#[derive(Debug, Clone)]
pub struct AddConclusionCommand {
    pub talk_session_id: TalkSessionId,
    pub content: String,
}

/// Handler for adding conclusions.
pub struct AddConclusionHandler {
    talk_sessions: Arc<dyn TalkSessionRepository>,
    conclusions: Arc<dyn ConclusionRepository>,
    clock: Arc<dyn Clock>,
}

impl AddConclusionHandler {
    pub fn new(
        talk_sessions: Arc<dyn TalkSessionRepository>,
        conclusions: Arc<dyn ConclusionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            talk_sessions,
            conclusions,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddConclusionCommand,
        metadata: CommandMetadata,
    ) -> Result<Conclusion, TalkSessionError> {
        let session = self
            .talk_sessions
            .find_by_id(cmd.talk_session_id)
            .await?
            .ok_or_else(|| TalkSessionError::not_found(cmd.talk_session_id))?;

        let now = self.clock.now();
        if !session.is_finished(now) {
            return Err(TalkSessionError::NotFinished);
        }
        session.authorize_owner(metadata.user_id)?;

        if self
            .conclusions
            .find_by_talk_session_id(cmd.talk_session_id)
            .await?
            .is_some()
        {
            return Err(TalkSessionError::ConclusionAlreadySet);
        }

        let conclusion =
            Conclusion::new(cmd.talk_session_id, metadata.user_id, cmd.content, now)
                .map_err(|e| TalkSessionError::validation("content", e.to_string()))?;
        self.conclusions.create(&conclusion).await?;
        Ok(conclusion)
    }
}
