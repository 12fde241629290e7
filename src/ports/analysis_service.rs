//! External analysis service port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TalkSessionId};

/// Contract for the external opinion-clustering service.
///
/// Both operations are consumed fire-and-forget after a vote commits:
/// their errors are logged, never surfaced to the voting caller, and
/// their latency must never block the vote response.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Kick off (or refresh) clustering analysis for a session.
    async fn start_analysis(&self, talk_session_id: TalkSessionId) -> Result<(), DomainError>;

    /// Request regeneration of the session's analysis report.
    async fn generate_report(&self, talk_session_id: TalkSessionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_service_is_object_safe() {
        fn _accepts_dyn(_svc: &dyn AnalysisService) {}
    }
}
