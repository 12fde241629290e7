//! In-memory ConsentRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId, UserId};
use crate::domain::talk_session::TalkSessionConsent;
use crate::ports::ConsentRepository;

/// Mutex-backed consent store keyed by (session, user).
#[derive(Default)]
pub struct InMemoryConsentRepository {
    consents: Mutex<HashMap<(TalkSessionId, UserId), TalkSessionConsent>>,
}

impl InMemoryConsentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConsentRepository for InMemoryConsentRepository {
    async fn store(&self, consent: &TalkSessionConsent) -> Result<(), DomainError> {
        let key = (consent.talk_session_id(), consent.user_id());
        let mut consents = self.consents.lock().unwrap();
        if consents.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::AlreadyConsented,
                "Consent has already been taken for this talk session",
            ));
        }
        consents.insert(key, consent.clone());
        Ok(())
    }

    async fn find_by_talk_session_and_user(
        &self,
        talk_session_id: TalkSessionId,
        user_id: UserId,
    ) -> Result<Option<TalkSessionConsent>, DomainError> {
        Ok(self
            .consents
            .lock()
            .unwrap()
            .get(&(talk_session_id, user_id))
            .cloned())
    }
}
