//! In-memory ActionItemRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{ActionItemId, DomainError, ErrorCode, TalkSessionId};
use crate::domain::timeline::ActionItem;
use crate::ports::ActionItemRepository;

/// Mutex-backed action item store.
#[derive(Default)]
pub struct InMemoryActionItemRepository {
    items: Mutex<HashMap<ActionItemId, ActionItem>>,
}

impl InMemoryActionItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionItemRepository for InMemoryActionItemRepository {
    async fn create(&self, item: &ActionItem) -> Result<(), DomainError> {
        self.items.lock().unwrap().insert(item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &ActionItem) -> Result<(), DomainError> {
        let mut items = self.items.lock().unwrap();
        if !items.contains_key(&item.id()) {
            return Err(DomainError::new(
                ErrorCode::ActionItemNotFound,
                format!("Action item not found: {}", item.id()),
            ));
        }
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ActionItemId) -> Result<Option<ActionItem>, DomainError> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn find_latest_by_talk_session(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<ActionItem>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.talk_session_id() == talk_session_id)
            .max_by_key(|i| i.sequence())
            .cloned())
    }
}
