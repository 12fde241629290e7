//! Vote repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OpinionId, UserId};
use crate::domain::vote::Vote;

/// Repository port for Vote persistence.
///
/// Storage must hold a unique index on (opinion_id, user_id); the
/// application-level already-voted pre-check alone admits a race under
/// concurrent duplicate submissions.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Persist a new vote.
    ///
    /// # Errors
    ///
    /// - `AlreadyVoted` when a vote for (opinion, user) already exists;
    ///   implementations map storage duplicate-key violations to this
    /// - `DatabaseError` on persistence failure
    async fn create(&self, vote: &Vote) -> Result<(), DomainError>;

    /// Find a user's vote on an opinion.
    ///
    /// Returns `None` if the user has not voted.
    async fn find_by_opinion_and_user(
        &self,
        opinion_id: OpinionId,
        user_id: UserId,
    ) -> Result<Option<Vote>, DomainError>;
}
