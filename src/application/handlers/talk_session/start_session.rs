//! StartTalkSessionHandler - creates and opens a new talk session.

use std::sync::Arc;

use crate::domain::foundation::{Clock, CommandMetadata, TalkSessionId, Timestamp};
use crate::domain::talk_session::{Location, TalkSession, TalkSessionError};
use crate::ports::{TalkSessionRepository, UserRepository};

/// Command to start a new talk session. The owner is the acting user
/// from the command metadata.
#[derive(Debug, Clone)]
pub struct StartTalkSessionCommand {
    pub theme: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub scheduled_end_time: Timestamp,
    pub location: Option<Location>,
    pub city: Option<String>,
    pub prefecture: Option<String>,
    pub restrictions: Vec<String>,
}

/// Handler for starting talk sessions.
pub struct StartTalkSessionHandler {
    talk_sessions: Arc<dyn TalkSessionRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl StartTalkSessionHandler {
    pub fn new(
        talk_sessions: Arc<dyn TalkSessionRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            talk_sessions,
            users,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartTalkSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<TalkSession, TalkSessionError> {
        // Only registered accounts may open sessions.
        let owner = self
            .users
            .find_by_id(metadata.user_id)
            .await?
            .ok_or(TalkSessionError::UserNotFound)?;
        if !owner.is_registered() {
            return Err(TalkSessionError::Forbidden);
        }

        let now = self.clock.now();
        let mut session = TalkSession::new(
            TalkSessionId::new(),
            owner.id(),
            cmd.theme,
            cmd.description,
            cmd.thumbnail_url,
            cmd.scheduled_end_time,
            cmd.location,
            cmd.city,
            cmd.prefecture,
            now,
        )?;
        session.update_restrictions(cmd.restrictions)?;
        session.start_session()?;

        self.talk_sessions.create(&session).await?;

        tracing::info!(
            talk_session_id = %session.id(),
            owner = %owner.id(),
            correlation_id = %metadata.correlation_id(),
            "talk session started"
        );
        Ok(session)
    }
}
