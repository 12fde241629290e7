//! PostgreSQL implementation of AnalysisRepository.
//!
//! Read-only: report rows are written by the external analysis worker.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::analysis::AnalysisReport;
use crate::domain::foundation::{AnalysisReportId, DomainError, TalkSessionId, Timestamp};
use crate::ports::AnalysisRepository;

/// PostgreSQL implementation of AnalysisRepository.
#[derive(Clone)]
pub struct PostgresAnalysisRepository {
    pool: PgPool,
}

impl PostgresAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for PostgresAnalysisRepository {
    async fn find_by_talk_session_id(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<AnalysisReport>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, talk_session_id, report, created_at, updated_at
            FROM analysis_reports
            WHERE talk_session_id = $1
            "#,
        )
        .bind(talk_session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch analysis report", e))?;

        match row {
            Some(row) => {
                let id: uuid::Uuid = row
                    .try_get("id")
                    .map_err(|e| db_error("Failed to get id", e))?;
                let talk_session_id: uuid::Uuid = row
                    .try_get("talk_session_id")
                    .map_err(|e| db_error("Failed to get talk_session_id", e))?;
                let report: Option<String> = row
                    .try_get("report")
                    .map_err(|e| db_error("Failed to get report", e))?;
                let created_at: chrono::DateTime<chrono::Utc> = row
                    .try_get("created_at")
                    .map_err(|e| db_error("Failed to get created_at", e))?;
                let updated_at: chrono::DateTime<chrono::Utc> = row
                    .try_get("updated_at")
                    .map_err(|e| db_error("Failed to get updated_at", e))?;

                Ok(Some(AnalysisReport::new(
                    AnalysisReportId::from_uuid(id),
                    TalkSessionId::from_uuid(talk_session_id),
                    report,
                    Timestamp::from_datetime(created_at),
                    Timestamp::from_datetime(updated_at),
                )))
            }
            None => Ok(None),
        }
    }
}
