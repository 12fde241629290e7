//! Conclusion repository port.

use async_trait::async_trait;

use crate::domain::conclusion::Conclusion;
use crate::domain::foundation::{DomainError, TalkSessionId};

/// Repository port for conclusion persistence (one per session).
#[async_trait]
pub trait ConclusionRepository: Send + Sync {
    /// Persist a new conclusion.
    async fn create(&self, conclusion: &Conclusion) -> Result<(), DomainError>;

    /// Find the conclusion for a session, if one has been written.
    async fn find_by_talk_session_id(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<Conclusion>, DomainError>;
}
