//! EditTalkSessionHandler - owner-only field replacement.

use std::sync::Arc;

use crate::domain::foundation::{Clock, CommandMetadata, TalkSessionId, Timestamp};
use crate::domain::talk_session::{Location, TalkSession, TalkSessionError};
use crate::ports::TalkSessionRepository;

/// Command to edit a talk session. Fields replace their current values.
#[derive(Debug, Clone)]
pub struct EditTalkSessionCommand {
    pub talk_session_id: TalkSessionId,
    pub theme: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub scheduled_end_time: Timestamp,
    pub location: Option<Location>,
    pub city: Option<String>,
    pub prefecture: Option<String>,
    pub restrictions: Vec<String>,
}

/// Handler for editing talk sessions.
pub struct EditTalkSessionHandler {
    talk_sessions: Arc<dyn TalkSessionRepository>,
    clock: Arc<dyn Clock>,
}

impl EditTalkSessionHandler {
    pub fn new(talk_sessions: Arc<dyn TalkSessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            talk_sessions,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: EditTalkSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<TalkSession, TalkSessionError> {
        let mut session = self
            .talk_sessions
            .find_by_id(cmd.talk_session_id)
            .await?
            .ok_or_else(|| TalkSessionError::not_found(cmd.talk_session_id))?;

        session.authorize_owner(metadata.user_id)?;

        let now = self.clock.now();
        session.change_theme(cmd.theme)?;
        session.change_description(cmd.description)?;
        session.change_thumbnail_url(cmd.thumbnail_url);
        session.change_scheduled_end_time(cmd.scheduled_end_time, now)?;
        session.change_location(cmd.location);
        session.change_city(cmd.city);
        session.change_prefecture(cmd.prefecture);
        session.update_restrictions(cmd.restrictions)?;

        self.talk_sessions.update(&session).await?;
        Ok(session)
    }
}
