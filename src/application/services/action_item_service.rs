//! Action item sequencing.

use std::sync::Arc;

use crate::domain::foundation::{
    ActionItemId, Clock, DomainError, ErrorCode, TalkSessionId,
};
use crate::domain::timeline::{ActionItem, ActionStatus};
use crate::ports::ActionItemRepository;

/// Assigns timeline positions and persists new action items.
///
/// Sequencing contract: an explicit parent places the new item at
/// `parent.sequence + 1`; without one, the latest item acts as the
/// implicit parent; the first item of a session gets sequence 0.
/// Sequence numbers are unique per session but tolerate gaps.
pub struct ActionItemService {
    action_items: Arc<dyn ActionItemRepository>,
    clock: Arc<dyn Clock>,
}

impl ActionItemService {
    pub fn new(action_items: Arc<dyn ActionItemRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            action_items,
            clock,
        }
    }

    /// Creates and persists an action item at the computed position.
    ///
    /// # Errors
    ///
    /// - `ActionItemNotFound` if the named parent doesn't exist
    /// - `ValidationFailed` on content length violations
    pub async fn create_item(
        &self,
        talk_session_id: TalkSessionId,
        parent_id: Option<ActionItemId>,
        content: String,
        status: ActionStatus,
    ) -> Result<ActionItem, DomainError> {
        let sequence = self.next_sequence(talk_session_id, parent_id).await?;
        let item = ActionItem::new(
            ActionItemId::new(),
            talk_session_id,
            sequence,
            content,
            status,
            self.clock.now(),
        )?;
        self.action_items.create(&item).await?;
        Ok(item)
    }

    async fn next_sequence(
        &self,
        talk_session_id: TalkSessionId,
        parent_id: Option<ActionItemId>,
    ) -> Result<u32, DomainError> {
        if let Some(parent_id) = parent_id {
            let parent = self
                .action_items
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::ActionItemNotFound,
                        format!("Action item not found: {}", parent_id),
                    )
                })?;
            return Ok(parent.sequence() + 1);
        }

        Ok(self
            .action_items
            .find_latest_by_talk_session(talk_session_id)
            .await?
            .map(|latest| latest.sequence() + 1)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryActionItemRepository;
    use crate::domain::foundation::SystemClock;

    fn service() -> ActionItemService {
        ActionItemService::new(
            Arc::new(InMemoryActionItemRepository::new()),
            Arc::new(SystemClock),
        )
    }

    #[tokio::test]
    async fn first_item_gets_sequence_zero() {
        let service = service();
        let item = service
            .create_item(
                TalkSessionId::new(),
                None,
                "調査する".to_string(),
                ActionStatus::NotStarted,
            )
            .await
            .unwrap();
        assert_eq!(item.sequence(), 0);
    }

    #[tokio::test]
    async fn latest_item_acts_as_implicit_parent() {
        let service = service();
        let session_id = TalkSessionId::new();
        for expected in 0..3 {
            let item = service
                .create_item(
                    session_id,
                    None,
                    "次の一手".to_string(),
                    ActionStatus::NotStarted,
                )
                .await
                .unwrap();
            assert_eq!(item.sequence(), expected);
        }
    }

    #[tokio::test]
    async fn explicit_parent_places_after_it() {
        let service = service();
        let session_id = TalkSessionId::new();
        let first = service
            .create_item(session_id, None, "one".to_string(), ActionStatus::NotStarted)
            .await
            .unwrap();
        let child = service
            .create_item(
                session_id,
                Some(first.id()),
                "two".to_string(),
                ActionStatus::NotStarted,
            )
            .await
            .unwrap();
        assert_eq!(child.sequence(), first.sequence() + 1);
    }

    #[tokio::test]
    async fn missing_parent_is_not_found() {
        let service = service();
        let err = service
            .create_item(
                TalkSessionId::new(),
                Some(ActionItemId::new()),
                "orphan".to_string(),
                ActionStatus::NotStarted,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ActionItemNotFound);
    }
}
