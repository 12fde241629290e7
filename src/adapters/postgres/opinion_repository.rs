//! PostgreSQL implementation of OpinionRepository.
//!
//! The opinion insert and its author's automatic agree vote share one
//! transaction; an opinion row without its seed vote must never become
//! visible. Reply IDs are derived from the `parent_opinion_id` column
//! rather than stored on the parent row.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, OpinionId, TalkSessionId, Timestamp, UserId};
use crate::domain::opinion::{Opinion, REDACTION_NOTICE};
use crate::domain::vote::Vote;
use crate::ports::OpinionRepository;

/// PostgreSQL implementation of OpinionRepository.
#[derive(Clone)]
pub struct PostgresOpinionRepository {
    pool: PgPool,
}

impl PostgresOpinionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OpinionRepository for PostgresOpinionRepository {
    async fn create_with_auto_vote(
        &self,
        opinion: &Opinion,
        auto_vote: &Vote,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO opinions (
                id, talk_session_id, author_id, parent_opinion_id,
                title, content, created_at, reference_url, reference_image_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(opinion.id().as_uuid())
        .bind(opinion.talk_session_id().as_uuid())
        .bind(opinion.author_id().map(|id| *id.as_uuid()))
        .bind(opinion.parent_opinion_id().map(|id| *id.as_uuid()))
        .bind(opinion.title())
        .bind(opinion.content())
        .bind(opinion.created_at().as_datetime())
        .bind(opinion.reference_url())
        .bind(opinion.reference_image_url())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert opinion", e))?;

        sqlx::query(
            r#"
            INSERT INTO votes (
                id, opinion_id, talk_session_id, user_id, vote_type, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(auto_vote.id().as_uuid())
        .bind(auto_vote.opinion_id().as_uuid())
        .bind(auto_vote.talk_session_id().as_uuid())
        .bind(auto_vote.user_id().as_uuid())
        .bind(auto_vote.vote_type().as_i32())
        .bind(auto_vote.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::AlreadyVoted,
                    "User has already voted on this opinion",
                )
            } else {
                db_error("Failed to insert auto vote", e)
            }
        })?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit opinion", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: OpinionId) -> Result<Option<Opinion>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT o.id, o.talk_session_id, o.author_id, o.parent_opinion_id,
                   o.title, o.content, o.created_at, o.reference_url, o.reference_image_url,
                   COALESCE(array_agg(r.id) FILTER (WHERE r.id IS NOT NULL), '{}') as reply_ids
            FROM opinions o
            LEFT JOIN opinions r ON r.parent_opinion_id = o.id
            WHERE o.id = $1
            GROUP BY o.id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch opinion", e))?;

        match row {
            Some(row) => Ok(Some(row_to_opinion(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_parent_id(&self, parent_id: OpinionId) -> Result<Vec<Opinion>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT o.id, o.talk_session_id, o.author_id, o.parent_opinion_id,
                   o.title, o.content, o.created_at, o.reference_url, o.reference_image_url,
                   COALESCE(array_agg(r.id) FILTER (WHERE r.id IS NOT NULL), '{}') as reply_ids
            FROM opinions o
            LEFT JOIN opinions r ON r.parent_opinion_id = o.id
            WHERE o.parent_opinion_id = $1
            GROUP BY o.id
            ORDER BY o.created_at ASC
            "#,
        )
        .bind(parent_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch replies", e))?;

        rows.into_iter().map(row_to_opinion).collect()
    }

    async fn mask(&self, id: OpinionId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE opinions SET
                content = $2,
                title = NULL,
                author_id = NULL,
                reference_url = NULL,
                reference_image_url = NULL
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(REDACTION_NOTICE)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mask opinion", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::OpinionNotFound,
                format!("Opinion not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_opinion(row: sqlx::postgres::PgRow) -> Result<Opinion, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let talk_session_id: uuid::Uuid = row
        .try_get("talk_session_id")
        .map_err(|e| db_error("Failed to get talk_session_id", e))?;
    let author_id: Option<uuid::Uuid> = row
        .try_get("author_id")
        .map_err(|e| db_error("Failed to get author_id", e))?;
    let parent_opinion_id: Option<uuid::Uuid> = row
        .try_get("parent_opinion_id")
        .map_err(|e| db_error("Failed to get parent_opinion_id", e))?;
    let title: Option<String> = row
        .try_get("title")
        .map_err(|e| db_error("Failed to get title", e))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| db_error("Failed to get content", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;
    let reference_url: Option<String> = row
        .try_get("reference_url")
        .map_err(|e| db_error("Failed to get reference_url", e))?;
    let reference_image_url: Option<String> = row
        .try_get("reference_image_url")
        .map_err(|e| db_error("Failed to get reference_image_url", e))?;
    let reply_uuids: Vec<uuid::Uuid> = row
        .try_get("reply_ids")
        .map_err(|e| db_error("Failed to get reply_ids", e))?;

    let reply_ids: Vec<OpinionId> = reply_uuids.into_iter().map(OpinionId::from_uuid).collect();

    Ok(Opinion::reconstitute(
        OpinionId::from_uuid(id),
        TalkSessionId::from_uuid(talk_session_id),
        author_id.map(UserId::from_uuid),
        parent_opinion_id.map(OpinionId::from_uuid),
        title,
        content,
        Timestamp::from_datetime(created_at),
        reference_url,
        reference_image_url,
        reply_ids,
    ))
}
