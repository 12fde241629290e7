//! EditActionItemHandler - updates content or status of a timeline item.

use std::sync::Arc;

use crate::domain::foundation::{ActionItemId, Clock, CommandMetadata};
use crate::domain::timeline::{ActionItem, ActionStatus, TimelineError};
use crate::ports::{ActionItemRepository, TalkSessionRepository};

/// Command to edit an action item; absent fields stay unchanged.
#[derive(Debug, Clone)]
pub struct EditActionItemCommand {
    pub action_item_id: ActionItemId,
    pub content: Option<String>,
    pub status: Option<ActionStatus>,
}

/// Handler for editing action items. Owner-only, finished sessions only.
pub struct EditActionItemHandler {
    talk_sessions: Arc<dyn TalkSessionRepository>,
    action_items: Arc<dyn ActionItemRepository>,
    clock: Arc<dyn Clock>,
}

impl EditActionItemHandler {
    pub fn new(
        talk_sessions: Arc<dyn TalkSessionRepository>,
        action_items: Arc<dyn ActionItemRepository>,
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
        cmd: EditActionItemCommand,
        metadata: CommandMetadata,
    ) -> Result<ActionItem, TimelineError> {
        let mut item = self
            .action_items
            .find_by_id(cmd.action_item_id)
            .await?
            .ok_or(TimelineError::ActionItemNotFound(cmd.action_item_id))?;

        let session = self
            .talk_sessions
            .find_by_id(item.talk_session_id())
            .await?
            .ok_or_else(|| TimelineError::TalkSessionNotFound(item.talk_session_id()))?;

        let now = self.clock.now();
        if !session.is_finished(now) {
            return Err(TimelineError::SessionNotFinished);
        }
        session.authorize_owner(metadata.user_id)?;

        if let Some(content) = cmd.content {
            item.update_content(content, now)?;
        }
        if let Some(status) = cmd.status {
            item.update_status(status, now);
        }

        self.action_items.update(&item).await?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryActionItemRepository, InMemoryTalkSessionRepository};
    use crate::domain::foundation::{FixedClock, TalkSessionId, Timestamp, UserId};
    use crate::domain::talk_session::TalkSession;

    struct Fixture {
        handler: EditActionItemHandler,
        items: Arc<InMemoryActionItemRepository>,
        clock: Arc<FixedClock>,
        item_id: ActionItemId,
        owner_id: UserId,
    }

    async fn fixture() -> Fixture {
        let talk_sessions: Arc<InMemoryTalkSessionRepository> =
            Arc::new(InMemoryTalkSessionRepository::new());
        let items = Arc::new(InMemoryActionItemRepository::new());
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
        talk_sessions.create(&session).await.unwrap();

        let item = ActionItem::new(
            ActionItemId::new(),
            session.id(),
            0,
            "資料を集める".to_string(),
            ActionStatus::NotStarted,
            now,
        )
        .unwrap();
        let item_id = item.id();
        items.create(&item).await.unwrap();

        let handler = EditActionItemHandler::new(talk_sessions, items.clone(), clock.clone());
        Fixture {
            handler,
            items,
            clock,
            item_id,
            owner_id,
        }
    }

    #[tokio::test]
    async fn owner_updates_content_and_status_after_finish() {
        let f = fixture().await;
        f.clock.set(Timestamp::now().plus_hours(25));

        let item = f
            .handler
            .handle(
                EditActionItemCommand {
                    action_item_id: f.item_id,
                    content: Some("資料を公開する".to_string()),
                    status: Some(ActionStatus::InProgress),
                },
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap();

        assert_eq!(item.content(), "資料を公開する");
        assert_eq!(item.status(), ActionStatus::InProgress);

        let stored = f.items.find_by_id(f.item_id).await.unwrap().unwrap();
        assert_eq!(stored.status(), ActionStatus::InProgress);
    }

    #[tokio::test]
    async fn unfinished_session_rejects_edits() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(
                EditActionItemCommand {
                    action_item_id: f.item_id,
                    content: None,
                    status: Some(ActionStatus::Completed),
                },
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TimelineError::SessionNotFinished);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let f = fixture().await;
        f.clock.set(Timestamp::now().plus_hours(25));

        let err = f
            .handler
            .handle(
                EditActionItemCommand {
                    action_item_id: f.item_id,
                    content: None,
                    status: Some(ActionStatus::Completed),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TimelineError::Forbidden);
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let f = fixture().await;
        let absent = ActionItemId::new();
        let err = f
            .handler
            .handle(
                EditActionItemCommand {
                    action_item_id: absent,
                    content: None,
                    status: None,
                },
                CommandMetadata::test_fixture_for(f.owner_id),
            )
            .await
            .unwrap_err();
        assert_eq!(err, TimelineError::ActionItemNotFound(absent));
    }
}
