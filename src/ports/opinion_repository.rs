//! Opinion repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OpinionId};
use crate::domain::opinion::Opinion;
use crate::domain::vote::Vote;

/// Repository port for Opinion aggregate persistence.
#[async_trait]
pub trait OpinionRepository: Send + Sync {
    /// Persist a new opinion together with the author's automatic
    /// agree-vote on it.
    ///
    /// Both writes happen in one transaction: an opinion without its
    /// self-vote must never become visible.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure (both writes rolled back)
    async fn create_with_auto_vote(
        &self,
        opinion: &Opinion,
        auto_vote: &Vote,
    ) -> Result<(), DomainError>;

    /// Find an opinion by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: OpinionId) -> Result<Option<Opinion>, DomainError>;

    /// Find the direct replies to an opinion.
    async fn find_by_parent_id(&self, parent_id: OpinionId) -> Result<Vec<Opinion>, DomainError>;

    /// Mask an opinion removed by moderation (redaction notice content,
    /// author cleared).
    ///
    /// # Errors
    ///
    /// - `OpinionNotFound` if the opinion doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn mask(&self, id: OpinionId) -> Result<(), DomainError>;
}
