//! PostgreSQL implementation of VoteRepository.
//!
//! One vote per (opinion, user) is enforced by a unique index; the
//! violation surfaces as `AlreadyVoted` so the race between two
//! concurrent casts resolves to exactly one stored vote.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, OpinionId, TalkSessionId, Timestamp, UserId, VoteId};
use crate::domain::vote::{Vote, VoteType};
use crate::ports::VoteRepository;

/// PostgreSQL implementation of VoteRepository.
#[derive(Clone)]
pub struct PostgresVoteRepository {
    pool: PgPool,
}

impl PostgresVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn create(&self, vote: &Vote) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO votes (
                id, opinion_id, talk_session_id, user_id, vote_type, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(vote.id().as_uuid())
        .bind(vote.opinion_id().as_uuid())
        .bind(vote.talk_session_id().as_uuid())
        .bind(vote.user_id().as_uuid())
        .bind(vote.vote_type().as_i32())
        .bind(vote.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::AlreadyVoted,
                    "User has already voted on this opinion",
                )
            } else {
                db_error("Failed to insert vote", e)
            }
        })?;

        Ok(())
    }

    async fn find_by_opinion_and_user(
        &self,
        opinion_id: OpinionId,
        user_id: UserId,
    ) -> Result<Option<Vote>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, opinion_id, talk_session_id, user_id, vote_type, created_at
            FROM votes
            WHERE opinion_id = $1 AND user_id = $2
            "#,
        )
        .bind(opinion_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch vote", e))?;

        match row {
            Some(row) => Ok(Some(row_to_vote(row)?)),
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_vote(row: sqlx::postgres::PgRow) -> Result<Vote, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let opinion_id: uuid::Uuid = row
        .try_get("opinion_id")
        .map_err(|e| db_error("Failed to get opinion_id", e))?;
    let talk_session_id: uuid::Uuid = row
        .try_get("talk_session_id")
        .map_err(|e| db_error("Failed to get talk_session_id", e))?;
    let user_id: uuid::Uuid = row
        .try_get("user_id")
        .map_err(|e| db_error("Failed to get user_id", e))?;
    let vote_type: i32 = row
        .try_get("vote_type")
        .map_err(|e| db_error("Failed to get vote_type", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    Ok(Vote::reconstitute(
        VoteId::from_uuid(id),
        OpinionId::from_uuid(opinion_id),
        TalkSessionId::from_uuid(talk_session_id),
        UserId::from_uuid(user_id),
        VoteType::from_i32(vote_type),
        Timestamp::from_datetime(created_at),
    ))
}
