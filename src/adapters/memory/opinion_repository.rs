//! In-memory OpinionRepository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::memory::InMemoryVoteRepository;
use crate::domain::foundation::{DomainError, ErrorCode, OpinionId};
use crate::domain::opinion::Opinion;
use crate::domain::vote::Vote;
use crate::ports::{OpinionRepository, VoteRepository};

/// Mutex-backed opinion store.
///
/// Shares the vote store so `create_with_auto_vote` keeps the same
/// all-or-nothing behavior as the PostgreSQL transaction.
pub struct InMemoryOpinionRepository {
    opinions: Mutex<HashMap<OpinionId, Opinion>>,
    votes: Arc<InMemoryVoteRepository>,
}

impl InMemoryOpinionRepository {
    pub fn new(votes: Arc<InMemoryVoteRepository>) -> Self {
        Self {
            opinions: Mutex::new(HashMap::new()),
            votes,
        }
    }

    /// Seeds an opinion directly, for test setup.
    pub fn insert(&self, opinion: Opinion) {
        self.opinions.lock().unwrap().insert(opinion.id(), opinion);
    }
}

#[async_trait]
impl OpinionRepository for InMemoryOpinionRepository {
    async fn create_with_auto_vote(
        &self,
        opinion: &Opinion,
        auto_vote: &Vote,
    ) -> Result<(), DomainError> {
        {
            let mut opinions = self.opinions.lock().unwrap();
            opinions.insert(opinion.id(), opinion.clone());
            if let Some(parent_id) = opinion.parent_opinion_id() {
                if let Some(parent) = opinions.get_mut(&parent_id) {
                    parent.add_reply(opinion.id());
                }
            }
        }

        if let Err(err) = self.votes.create(auto_vote).await {
            // roll back the opinion so no opinion-without-vote is visible
            self.opinions.lock().unwrap().remove(&opinion.id());
            self.votes.remove(auto_vote.id());
            return Err(err);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: OpinionId) -> Result<Option<Opinion>, DomainError> {
        Ok(self.opinions.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_parent_id(&self, parent_id: OpinionId) -> Result<Vec<Opinion>, DomainError> {
        Ok(self
            .opinions
            .lock()
            .unwrap()
            .values()
            .filter(|o| o.parent_opinion_id() == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn mask(&self, id: OpinionId) -> Result<(), DomainError> {
        let mut opinions = self.opinions.lock().unwrap();
        match opinions.get_mut(&id) {
            Some(opinion) => {
                opinion.redact();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::OpinionNotFound,
                format!("Opinion not found: {}", id),
            )),
        }
    }
}
