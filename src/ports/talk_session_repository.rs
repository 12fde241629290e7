//! Talk session repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TalkSessionId};
use crate::domain::talk_session::TalkSession;

/// Repository port for TalkSession aggregate persistence.
#[async_trait]
pub trait TalkSessionRepository: Send + Sync {
    /// Save a new talk session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &TalkSession) -> Result<(), DomainError>;

    /// Update an existing talk session.
    ///
    /// # Errors
    ///
    /// - `TalkSessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &TalkSession) -> Result<(), DomainError>;

    /// Find a talk session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: TalkSessionId) -> Result<Option<TalkSession>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn talk_session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TalkSessionRepository) {}
    }
}
