//! Report repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OpinionId};
use crate::domain::opinion::{Report, ReportStatus};

/// Repository port for moderation report persistence.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a new report.
    async fn create(&self, report: &Report) -> Result<(), DomainError>;

    /// Find all reports against an opinion.
    async fn find_by_opinion_id(&self, opinion_id: OpinionId) -> Result<Vec<Report>, DomainError>;

    /// Transition every report against an opinion to the given status.
    ///
    /// Bulk update in one transaction; resolving moderation applies to
    /// all reports on the opinion, not a single row.
    async fn update_status_by_opinion(
        &self,
        opinion_id: OpinionId,
        status: ReportStatus,
    ) -> Result<(), DomainError>;
}
