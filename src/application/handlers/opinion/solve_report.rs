//! SolveReportHandler - bulk resolution of an opinion's reports.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, OpinionId};
use crate::domain::opinion::{OpinionError, ReportStatus};
use crate::ports::{OpinionRepository, ReportRepository, TalkSessionRepository};

/// Command to resolve every report against an opinion.
#[derive(Debug, Clone)]
pub struct SolveReportCommand {
    pub opinion_id: OpinionId,
    pub status: ReportStatus,
}

/// Handler for resolving reports. Session-owner only; non-owners are
/// answered with `TalkSessionNotFound` so session existence never leaks.
pub struct SolveReportHandler {
    opinions: Arc<dyn OpinionRepository>,
    reports: Arc<dyn ReportRepository>,
    talk_sessions: Arc<dyn TalkSessionRepository>,
}

impl SolveReportHandler {
    pub fn new(
        opinions: Arc<dyn OpinionRepository>,
        reports: Arc<dyn ReportRepository>,
        talk_sessions: Arc<dyn TalkSessionRepository>,
    ) -> Self {
        Self {
            opinions,
            reports,
            talk_sessions,
        }
    }

    pub async fn handle(
        &self,
        cmd: SolveReportCommand,
        metadata: CommandMetadata,
    ) -> Result<(), OpinionError> {
        let opinion = self
            .opinions
            .find_by_id(cmd.opinion_id)
            .await?
            .ok_or_else(|| OpinionError::not_found(cmd.opinion_id))?;

        let session = self
            .talk_sessions
            .find_by_id(opinion.talk_session_id())
            .await?
            .ok_or(OpinionError::TalkSessionNotFound)?;
        if !session.is_owner(metadata.user_id) {
            // existence masking: non-owners learn nothing
            return Err(OpinionError::TalkSessionNotFound);
        }

        // every report on the opinion transitions together
        self.reports
            .update_status_by_opinion(cmd.opinion_id, cmd.status)
            .await?;

        if cmd.status == ReportStatus::Deleted {
            self.opinions.mask(cmd.opinion_id).await?;
        }

        tracing::info!(
            opinion_id = %cmd.opinion_id,
            status = %cmd.status,
            correlation_id = %metadata.correlation_id(),
            "reports resolved"
        );
        Ok(())
    }
}
