//! AddActionItemHandler - appends to a finished session's timeline.

use std::sync::Arc;

use crate::application::services::ActionItemService;
use crate::domain::foundation::{ActionItemId, Clock, CommandMetadata, TalkSessionId};
use crate::domain::timeline::{ActionItem, ActionStatus, TimelineError};
use crate::ports::TalkSessionRepository;

/// Command to add an action item.
#[derive(Debug, Clone)]
pub struct AddActionItemCommand {
    pub talk_session_id: TalkSessionId,
    /// Place the new item after this one; defaults to the latest item.
    pub parent_action_item_id: Option<ActionItemId>,
    pub content: String,
    pub status: ActionStatus,
}

/// Handler for adding action items. Owner-only, finished sessions only.
pub struct AddActionItemHandler {
    talk_sessions: Arc<dyn TalkSessionRepository>,
    action_items: Arc<ActionItemService>,
    clock: Arc<dyn Clock>,
}

impl AddActionItemHandler {
    pub fn new(
        talk_sessions: Arc<dyn TalkSessionRepository>,
        action_items: Arc<ActionItemService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            talk_sessions,
            action_items,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddActionItemCommand,
        metadata: CommandMetadata,
    ) -> Result<ActionItem, TimelineError> {
        let session = self
            .talk_sessions
            .find_by_id(cmd.talk_session_id)
            .await?
            .ok_or(TimelineError::TalkSessionNotFound(cmd.talk_session_id))?;

        if !session.is_finished(self.clock.now()) {
            return Err(TimelineError::SessionNotFinished);
        }
        session.authorize_owner(metadata.user_id)?;

        let item = self
            .action_items
            .create_item(
                cmd.talk_session_id,
                cmd.parent_action_item_id,
                cmd.content,
                cmd.status,
            )
            .await
            .map_err(|err| match err.code {
                crate::domain::foundation::ErrorCode::ActionItemNotFound => {
                    TimelineError::ActionItemNotFound(
                        cmd.parent_action_item_id.unwrap_or_default(),
                    )
                }
                _ => TimelineError::from(err),
            })?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryActionItemRepository, InMemoryTalkSessionRepository};
    use crate::domain::foundation::{FixedClock, Timestamp, UserId};
    use crate::domain::talk_session::TalkSession;

    struct Fixture {
        handler: AddActionItemHandler,
        clock: Arc<FixedClock>,
        session_id: TalkSessionId,
        owner_id: UserId,
    }

    async fn fixture() -> Fixture {
        let talk_sessions: Arc<InMemoryTalkSessionRepository> =
            Arc::new(InMemoryTalkSessionRepository::new());
        let now = Timestamp::now();
        let clock = Arc::new(FixedClock::new(now));
        let owner_id = UserId::new();
        let session = TalkSession::new(
            TalkSessionId::new(),
            owner_id,
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
        let session_id = session.id();
        talk_sessions.create(&session).await.unwrap();

        let action_items = Arc::new(ActionItemService::new(
            Arc::new(InMemoryActionItemRepository::new()),
            clock.clone(),
        ));
        let handler = AddActionItemHandler::new(talk_sessions, action_items, clock.clone());
        Fixture {
            handler,
            clock,
            session_id,
            owner_id,
        }
    }

    fn command(session_id: TalkSessionId, content: &str) -> AddActionItemCommand {
        AddActionItemCommand {
            talk_session_id: session_id,
            parent_action_item_id: None,
            content: content.to_string(),
            status: ActionStatus::NotStarted,
        }
    }

    #[tokio::test]
    async fn unfinished_session_rejects_items() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(
                command(f.session_id, "announce"),
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TimelineError::SessionNotFinished);
    }

    #[tokio::test]
    async fn owner_appends_items_in_sequence() {
        let f = fixture().await;
        f.clock.set(Timestamp::now().plus_hours(25));

        let first = f
            .handler
            .handle(
                command(f.session_id, "予算案を出す"),
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap();
        let second = f
            .handler
            .handle(
                command(f.session_id, "説明会を開く"),
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap();

        assert_eq!(first.sequence(), 0);
        assert_eq!(second.sequence(), 1);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let f = fixture().await;
        f.clock.set(Timestamp::now().plus_hours(25));

        let err = f
            .handler
            .handle(
                command(f.session_id, "announce"),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TimelineError::Forbidden);
    }

    #[tokio::test]
    async fn overlong_content_fails_validation() {
        let f = fixture().await;
        f.clock.set(Timestamp::now().plus_hours(25));

        let err = f
            .handler
            .handle(
                command(f.session_id, &"あ".repeat(41)),
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TimelineError::ValidationFailed { .. }));
    }
}
