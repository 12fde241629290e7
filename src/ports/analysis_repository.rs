//! Analysis report repository port.

use async_trait::async_trait;

use crate::domain::analysis::AnalysisReport;
use crate::domain::foundation::{DomainError, TalkSessionId};

/// Repository port for reading stored analysis reports.
///
/// Report bodies are written by the external analysis service through
/// its own pipeline; this side only reads them to judge staleness.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Find the latest analysis report for a session.
    async fn find_by_talk_session_id(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<AnalysisReport>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AnalysisRepository) {}
    }
}
