//! PostgreSQL implementation of ConsentRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId, Timestamp, UserId};
use crate::domain::talk_session::TalkSessionConsent;
use crate::ports::ConsentRepository;

/// PostgreSQL implementation of ConsentRepository.
#[derive(Clone)]
pub struct PostgresConsentRepository {
    pool: PgPool,
}

impl PostgresConsentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsentRepository for PostgresConsentRepository {
    async fn store(&self, consent: &TalkSessionConsent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO consents (
                talk_session_id, user_id, consented_at, restrictions
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(consent.talk_session_id().as_uuid())
        .bind(consent.user_id().as_uuid())
        .bind(consent.consented_at().as_datetime())
        .bind(consent.restrictions())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::AlreadyConsented,
                    "User has already consented to this talk session",
                )
            } else {
                db_error("Failed to insert consent", e)
            }
        })?;

        Ok(())
    }

    async fn find_by_talk_session_and_user(
        &self,
        talk_session_id: TalkSessionId,
        user_id: UserId,
    ) -> Result<Option<TalkSessionConsent>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT talk_session_id, user_id, consented_at, restrictions
            FROM consents
            WHERE talk_session_id = $1 AND user_id = $2
            "#,
        )
        .bind(talk_session_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch consent", e))?;

        match row {
            Some(row) => Ok(Some(row_to_consent(row)?)),
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_consent(row: sqlx::postgres::PgRow) -> Result<TalkSessionConsent, DomainError> {
    let talk_session_id: uuid::Uuid = row
        .try_get("talk_session_id")
        .map_err(|e| db_error("Failed to get talk_session_id", e))?;
    let user_id: uuid::Uuid = row
        .try_get("user_id")
        .map_err(|e| db_error("Failed to get user_id", e))?;
    let consented_at: chrono::DateTime<chrono::Utc> = row
        .try_get("consented_at")
        .map_err(|e| db_error("Failed to get consented_at", e))?;
    let restrictions: Vec<String> = row
        .try_get("restrictions")
        .map_err(|e| db_error("Failed to get restrictions", e))?;

    TalkSessionConsent::new(
        TalkSessionId::from_uuid(talk_session_id),
        UserId::from_uuid(user_id),
        Timestamp::from_datetime(consented_at),
        restrictions,
    )
    .map_err(|e| db_error("Invalid stored consent", e))
}
