//! In-memory AnalysisRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::analysis::AnalysisReport;
use crate::domain::foundation::{DomainError, TalkSessionId};
use crate::ports::AnalysisRepository;

/// Mutex-backed analysis report store.
#[derive(Default)]
pub struct InMemoryAnalysisRepository {
    reports: Mutex<HashMap<TalkSessionId, AnalysisReport>>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a report, standing in for the analysis pipeline's writes.
    pub fn insert(&self, report: AnalysisReport) {
        self.reports
            .lock()
            .unwrap()
            .insert(report.talk_session_id(), report);
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn find_by_talk_session_id(
        &self,
        talk_session_id: TalkSessionId,
    ) -> Result<Option<AnalysisReport>, DomainError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .get(&talk_session_id)
            .cloned())
    }
}
