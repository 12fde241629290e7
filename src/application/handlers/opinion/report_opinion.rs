//! ReportOpinionHandler - files a moderation report against an opinion.

use std::sync::Arc;

use crate::domain::foundation::{Clock, CommandMetadata, OpinionId};
use crate::domain::opinion::{OpinionError, Reason, Report};
use crate::ports::{OpinionRepository, ReportRepository};

/// Command to report an opinion.
///
/// `reason_code` is the raw integer from the client; unknown codes
/// coerce to `Other` rather than failing.
#[derive(Debug, Clone)]
pub struct ReportOpinionCommand {
    pub opinion_id: OpinionId,
    pub reason_code: i32,
    pub reason_text: Option<String>,
}

/// Handler for reporting opinions.
pub struct ReportOpinionHandler {
    opinions: Arc<dyn OpinionRepository>,
    reports: Arc<dyn ReportRepository>,
    clock: Arc<dyn Clock>,
}

impl ReportOpinionHandler {
    pub fn new(
        opinions: Arc<dyn OpinionRepository>,
        reports: Arc<dyn ReportRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            opinions,
            reports,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReportOpinionCommand,
        metadata: CommandMetadata,
    ) -> Result<Report, OpinionError> {
        let opinion = self
            .opinions
            .find_by_id(cmd.opinion_id)
            .await?
            .ok_or_else(|| OpinionError::not_found(cmd.opinion_id))?;

        let report = opinion.report(
            metadata.user_id,
            Reason::from_i32(cmd.reason_code),
            cmd.reason_text,
            self.clock.now(),
        );
        self.reports.create(&report).await?;

        tracing::info!(
            opinion_id = %cmd.opinion_id,
            reason = report.reason().label(),
            correlation_id = %metadata.correlation_id(),
            "opinion reported"
        );
        Ok(report)
    }
}
