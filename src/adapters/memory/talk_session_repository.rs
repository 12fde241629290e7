//! In-memory TalkSessionRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId};
use crate::domain::talk_session::TalkSession;
use crate::ports::TalkSessionRepository;

/// Mutex-backed map of sessions, for tests and local runs.
#[derive(Default)]
pub struct InMemoryTalkSessionRepository {
    sessions: Mutex<HashMap<TalkSessionId, TalkSession>>,
}

impl InMemoryTalkSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TalkSessionRepository for InMemoryTalkSessionRepository {
    async fn create(&self, session: &TalkSession) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &TalkSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.contains_key(&session.id()) {
            return Err(DomainError::new(
                ErrorCode::TalkSessionNotFound,
                format!("Talk session not found: {}", session.id()),
            ));
        }
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TalkSessionId) -> Result<Option<TalkSession>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(&id).cloned())
    }
}
