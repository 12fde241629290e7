//! PostgreSQL implementation of TalkSessionRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId, Timestamp, UserId};
use crate::domain::talk_session::{Location, TalkSession};
use crate::ports::TalkSessionRepository;

/// PostgreSQL implementation of TalkSessionRepository.
#[derive(Clone)]
pub struct PostgresTalkSessionRepository {
    pool: PgPool,
}

impl PostgresTalkSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TalkSessionRepository for PostgresTalkSessionRepository {
    async fn create(&self, session: &TalkSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO talk_sessions (
                id, owner_user_id, theme, description, thumbnail_url,
                scheduled_end_time, created_at, latitude, longitude,
                city, prefecture, restrictions, hide_report, started, end_processed
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.owner_user_id().as_uuid())
        .bind(session.theme())
        .bind(session.description())
        .bind(session.thumbnail_url())
        .bind(session.scheduled_end_time().as_datetime())
        .bind(session.created_at().as_datetime())
        .bind(session.location().map(|l| l.latitude()))
        .bind(session.location().map(|l| l.longitude()))
        .bind(session.city())
        .bind(session.prefecture())
        .bind(session.restrictions())
        .bind(session.hide_report())
        .bind(session.is_started())
        .bind(session.is_end_processed())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert talk session", e))?;

        Ok(())
    }

    async fn update(&self, session: &TalkSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE talk_sessions SET
                theme = $2,
                description = $3,
                thumbnail_url = $4,
                scheduled_end_time = $5,
                latitude = $6,
                longitude = $7,
                city = $8,
                prefecture = $9,
                restrictions = $10,
                hide_report = $11,
                started = $12,
                end_processed = $13
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.theme())
        .bind(session.description())
        .bind(session.thumbnail_url())
        .bind(session.scheduled_end_time().as_datetime())
        .bind(session.location().map(|l| l.latitude()))
        .bind(session.location().map(|l| l.longitude()))
        .bind(session.city())
        .bind(session.prefecture())
        .bind(session.restrictions())
        .bind(session.hide_report())
        .bind(session.is_started())
        .bind(session.is_end_processed())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update talk session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TalkSessionNotFound,
                format!("Talk session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: TalkSessionId) -> Result<Option<TalkSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_user_id, theme, description, thumbnail_url,
                   scheduled_end_time, created_at, latitude, longitude,
                   city, prefecture, restrictions, hide_report, started, end_processed
            FROM talk_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch talk session", e))?;

        match row {
            Some(row) => Ok(Some(row_to_talk_session(row)?)),
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_talk_session(row: sqlx::postgres::PgRow) -> Result<TalkSession, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let owner_user_id: uuid::Uuid = row
        .try_get("owner_user_id")
        .map_err(|e| db_error("Failed to get owner_user_id", e))?;
    let theme: String = row
        .try_get("theme")
        .map_err(|e| db_error("Failed to get theme", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| db_error("Failed to get description", e))?;
    let thumbnail_url: Option<String> = row
        .try_get("thumbnail_url")
        .map_err(|e| db_error("Failed to get thumbnail_url", e))?;
    let scheduled_end_time: chrono::DateTime<chrono::Utc> = row
        .try_get("scheduled_end_time")
        .map_err(|e| db_error("Failed to get scheduled_end_time", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;
    let latitude: Option<f64> = row
        .try_get("latitude")
        .map_err(|e| db_error("Failed to get latitude", e))?;
    let longitude: Option<f64> = row
        .try_get("longitude")
        .map_err(|e| db_error("Failed to get longitude", e))?;
    let city: Option<String> = row
        .try_get("city")
        .map_err(|e| db_error("Failed to get city", e))?;
    let prefecture: Option<String> = row
        .try_get("prefecture")
        .map_err(|e| db_error("Failed to get prefecture", e))?;
    let restrictions: Vec<String> = row
        .try_get("restrictions")
        .map_err(|e| db_error("Failed to get restrictions", e))?;
    let hide_report: bool = row
        .try_get("hide_report")
        .map_err(|e| db_error("Failed to get hide_report", e))?;
    let started: bool = row
        .try_get("started")
        .map_err(|e| db_error("Failed to get started", e))?;
    let end_processed: bool = row
        .try_get("end_processed")
        .map_err(|e| db_error("Failed to get end_processed", e))?;

    let location = match (latitude, longitude) {
        (Some(lat), Some(lng)) => Some(
            Location::new(lat, lng).map_err(|e| db_error("Invalid stored location", e))?,
        ),
        _ => None,
    };

    Ok(TalkSession::reconstitute(
        TalkSessionId::from_uuid(id),
        UserId::from_uuid(owner_user_id),
        theme,
        description,
        thumbnail_url,
        Timestamp::from_datetime(scheduled_end_time),
        Timestamp::from_datetime(created_at),
        location,
        city,
        prefecture,
        restrictions,
        hide_report,
        started,
        end_processed,
    ))
}
