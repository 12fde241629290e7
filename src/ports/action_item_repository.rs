//! Action item repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ActionItemId, DomainError, TalkSessionId};
use crate::domain::timeline::ActionItem;

/// Repository port for timeline action item persistence.
#[async_trait]
pub trait ActionItemRepository: Send + Sync {
    /// Persist a new action item.
    async fn create(&self, item: &ActionItem) -> Result<(), DomainError>;

    /// Update an existing action item.
    ///
    /// # Errors
    ///
    /// - `ActionItemNotFound` if the item doesn't exist
    async fn update(&self, item: &ActionItem) -> Result<(), DomainError>;

    /// Find an action item by its ID.
    async fn find_by_id(&self, id: ActionItemId) -> Result<Option<ActionItem>, DomainError>;

    /// Find the highest-sequence item for a session, if any.
    async fn find_latest_by_talk_session(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<ActionItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_item_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ActionItemRepository) {}
    }
}
