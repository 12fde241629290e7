//! PostgreSQL implementation of ConclusionRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::conclusion::Conclusion;
use crate::domain::foundation::{DomainError, TalkSessionId, Timestamp, UserId};
use crate::ports::ConclusionRepository;

/// PostgreSQL implementation of ConclusionRepository.
#[derive(Clone)]
pub struct PostgresConclusionRepository {
    pool: PgPool,
}

impl PostgresConclusionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConclusionRepository for PostgresConclusionRepository {
    async fn create(&self, conclusion: &Conclusion) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO conclusions (
                talk_session_id, created_by, content, created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(conclusion.talk_session_id().as_uuid())
        .bind(conclusion.created_by().as_uuid())
        .bind(conclusion.content())
        .bind(conclusion.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert conclusion", e))?;

        Ok(())
    }

    async fn find_by_talk_session_id(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<Conclusion>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT talk_session_id, created_by, content, created_at
            FROM conclusions
            WHERE talk_session_id = $1
            "#,
        )
        .bind(talk_session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch conclusion", e))?;

        match row {
            Some(row) => {
                let talk_session_id: uuid::Uuid = row
                    .try_get("talk_session_id")
                    .map_err(|e| db_error("Failed to get talk_session_id", e))?;
                let created_by: uuid::Uuid = row
                    .try_get("created_by")
                    .map_err(|e| db_error("Failed to get created_by", e))?;
                let content: String = row
                    .try_get("content")
                    .map_err(|e| db_error("Failed to get content", e))?;
                let created_at: chrono::DateTime<chrono::Utc> = row
                    .try_get("created_at")
                    .map_err(|e| db_error("Failed to get created_at", e))?;

                let conclusion = Conclusion::new(
                    TalkSessionId::from_uuid(talk_session_id),
                    UserId::from_uuid(created_by),
                    content,
                    Timestamp::from_datetime(created_at),
                )
                .map_err(|e| db_error("Invalid stored conclusion", e))?;

                Ok(Some(conclusion))
            }
            None => Ok(None),
        }
    }
}
