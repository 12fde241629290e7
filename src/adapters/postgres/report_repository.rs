//! PostgreSQL implementation of ReportRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::foundation::{DomainError, OpinionId, ReportId, TalkSessionId, Timestamp, UserId};
use crate::domain::opinion::{Reason, Report, ReportStatus};
use crate::ports::ReportRepository;

/// PostgreSQL implementation of ReportRepository.
#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn create(&self, report: &Report) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, opinion_id, talk_session_id, reporter_id,
                reason, reason_text, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(report.id().as_uuid())
        .bind(report.opinion_id().as_uuid())
        .bind(report.talk_session_id().as_uuid())
        .bind(report.reporter_id().as_uuid())
        .bind(report.reason().as_i32())
        .bind(report.reason_text())
        .bind(report.status().as_str())
        .bind(report.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert report", e))?;

        Ok(())
    }

    async fn find_by_opinion_id(&self, opinion_id: OpinionId) -> Result<Vec<Report>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, opinion_id, talk_session_id, reporter_id,
                   reason, reason_text, status, created_at
            FROM reports
            WHERE opinion_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(opinion_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch reports", e))?;

        rows.into_iter().map(row_to_report).collect()
    }

    async fn update_status_by_opinion(
        &self,
        opinion_id: OpinionId,
        status: ReportStatus,
    ) -> Result<(), DomainError> {
        // Resolving an opinion moves every report against it at once.
        sqlx::query("UPDATE reports SET status = $2 WHERE opinion_id = $1")
            .bind(opinion_id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update report statuses", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_report(row: sqlx::postgres::PgRow) -> Result<Report, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let opinion_id: uuid::Uuid = row
        .try_get("opinion_id")
        .map_err(|e| db_error("Failed to get opinion_id", e))?;
    let talk_session_id: uuid::Uuid = row
        .try_get("talk_session_id")
        .map_err(|e| db_error("Failed to get talk_session_id", e))?;
    let reporter_id: uuid::Uuid = row
        .try_get("reporter_id")
        .map_err(|e| db_error("Failed to get reporter_id", e))?;
    let reason: i32 = row
        .try_get("reason")
        .map_err(|e| db_error("Failed to get reason", e))?;
    let reason_text: Option<String> = row
        .try_get("reason_text")
        .map_err(|e| db_error("Failed to get reason_text", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_error("Failed to get status", e))?;
    let status: ReportStatus = status_str
        .parse()
        .map_err(|e| db_error("Invalid stored report status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    Ok(Report::reconstitute(
        ReportId::from_uuid(id),
        OpinionId::from_uuid(opinion_id),
        TalkSessionId::from_uuid(talk_session_id),
        UserId::from_uuid(reporter_id),
        Reason::from_i32(reason),
        reason_text,
        status,
        Timestamp::from_datetime(created_at),
    ))
}
