//! Consent repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TalkSessionId, UserId};
use crate::domain::talk_session::TalkSessionConsent;

/// Repository port for consent record persistence.
///
/// Storage must hold a unique index on (talk_session_id, user_id).
#[async_trait]
pub trait ConsentRepository: Send + Sync {
    /// Store a consent record.
    ///
    /// # Errors
    ///
    /// - `AlreadyConsented` when a record for (session, user) already
    ///   exists; implementations map duplicate-key violations to this
    async fn store(&self, consent: &TalkSessionConsent) -> Result<(), DomainError>;

    /// Look up a user's consent for a session.
    ///
    /// Absence means "has not consented", never an error.
    async fn find_by_talk_session_and_user(
        &self,
        talk_session_id: TalkSessionId,
        user_id: UserId,
    ) -> Result<Option<TalkSessionConsent>, DomainError>;
}
