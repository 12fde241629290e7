//! PostgreSQL implementation of ActionItemRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::foundation::{ActionItemId, DomainError, ErrorCode, TalkSessionId, Timestamp};
use crate::domain::timeline::{ActionItem, ActionStatus};
use crate::ports::ActionItemRepository;

/// PostgreSQL implementation of ActionItemRepository.
#[derive(Clone)]
pub struct PostgresActionItemRepository {
    pool: PgPool,
}

impl PostgresActionItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActionItemRepository for PostgresActionItemRepository {
    async fn create(&self, item: &ActionItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO action_items (
                id, talk_session_id, sequence, content, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.talk_session_id().as_uuid())
        .bind(item.sequence() as i32)
        .bind(item.content())
        .bind(item.status().as_str())
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert action item", e))?;

        Ok(())
    }

    async fn update(&self, item: &ActionItem) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE action_items SET
                content = $2,
                status = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.content())
        .bind(item.status().as_str())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update action item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ActionItemNotFound,
                format!("Action item not found: {}", item.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ActionItemId) -> Result<Option<ActionItem>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, talk_session_id, sequence, content, status, created_at, updated_at
            FROM action_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch action item", e))?;

        match row {
            Some(row) => Ok(Some(row_to_action_item(row)?)),
            None => Ok(None),
        }
    }

    async fn find_latest_by_talk_session(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<ActionItem>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, talk_session_id, sequence, content, status, created_at, updated_at
            FROM action_items
            WHERE talk_session_id = $1
            ORDER BY sequence DESC
            LIMIT 1
            "#,
        )
        .bind(talk_session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch latest action item", e))?;

        match row {
            Some(row) => Ok(Some(row_to_action_item(row)?)),
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_action_item(row: sqlx::postgres::PgRow) -> Result<ActionItem, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let talk_session_id: uuid::Uuid = row
        .try_get("talk_session_id")
        .map_err(|e| db_error("Failed to get talk_session_id", e))?;
    let sequence: i32 = row
        .try_get("sequence")
        .map_err(|e| db_error("Failed to get sequence", e))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| db_error("Failed to get content", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_error("Failed to get status", e))?;
    let status: ActionStatus = status_str
        .parse()
        .map_err(|e| db_error("Invalid stored action status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("Failed to get updated_at", e))?;

    Ok(ActionItem::reconstitute(
        ActionItemId::from_uuid(id),
        TalkSessionId::from_uuid(talk_session_id),
        sequence as u32,
        content,
        status,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
