//! In-memory VoteRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, OpinionId, UserId, VoteId};
use crate::domain::vote::Vote;
use crate::ports::VoteRepository;

/// Mutex-backed vote store enforcing (opinion, user) uniqueness, the
/// same guarantee the PostgreSQL unique index provides.
#[derive(Default)]
pub struct InMemoryVoteRepository {
    votes: Mutex<Vec<Vote>>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored votes, for test assertions.
    pub fn all(&self) -> Vec<Vote> {
        self.votes.lock().unwrap().clone()
    }

    /// Removes a vote by id; backs the in-memory transactional rollback
    /// in the opinion adapter.
    pub(crate) fn remove(&self, id: VoteId) {
        self.votes.lock().unwrap().retain(|v| v.id() != id);
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn create(&self, vote: &Vote) -> Result<(), DomainError> {
        let mut votes = self.votes.lock().unwrap();
        let duplicate = votes
            .iter()
            .any(|v| v.opinion_id() == vote.opinion_id() && v.user_id() == vote.user_id());
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::AlreadyVoted,
                "This opinion has already been voted on",
            ));
        }
        votes.push(vote.clone());
        Ok(())
    }

    async fn find_by_opinion_and_user(
        &self,
        opinion_id: OpinionId,
        user_id: UserId,
    ) -> Result<Option<Vote>, DomainError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.opinion_id() == opinion_id && v.user_id() == user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TalkSessionId, Timestamp};
    use crate::domain::vote::VoteType;

    #[tokio::test]
    async fn duplicate_votes_for_same_pair_are_rejected() {
        let repo = InMemoryVoteRepository::new();
        let opinion_id = OpinionId::new();
        let user_id = UserId::new();
        let session_id = TalkSessionId::new();

        let first = Vote::new(
            VoteId::new(),
            opinion_id,
            session_id,
            user_id,
            VoteType::Agree,
            Timestamp::now(),
        )
        .unwrap();
        let second = Vote::new(
            VoteId::new(),
            opinion_id,
            session_id,
            user_id,
            VoteType::Disagree,
            Timestamp::now(),
        )
        .unwrap();

        repo.create(&first).await.unwrap();
        let err = repo.create(&second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyVoted);
        assert_eq!(repo.all().len(), 1);
    }
}
