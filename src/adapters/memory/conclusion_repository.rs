//! In-memory ConclusionRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::conclusion::Conclusion;
use crate::domain::foundation::{DomainError, TalkSessionId};
use crate::ports::ConclusionRepository;

/// Mutex-backed conclusion store, one entry per session.
#[derive(Default)]
pub struct InMemoryConclusionRepository {
    conclusions: Mutex<HashMap<TalkSessionId, Conclusion>>,
}

impl InMemoryConclusionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConclusionRepository for InMemoryConclusionRepository {
    async fn create(&self, conclusion: &Conclusion) -> Result<(), DomainError> {
        self.conclusions
            .lock()
            .unwrap()
            .insert(conclusion.talk_session_id(), conclusion.clone());
        Ok(())
    }

    async fn find_by_talk_session_id(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<Conclusion>, DomainError> {
        Ok(self
            .conclusions
            .lock()
            .unwrap()
            .get(&talk_session_id)
            .cloned())
    }
}
