//! In-memory ReportRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OpinionId};
use crate::domain::opinion::{Report, ReportStatus};
use crate::ports::ReportRepository;

/// Mutex-backed report store.
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: &Report) -> Result<(), DomainError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn find_by_opinion_id(&self, opinion_id: OpinionId) -> Result<Vec<Report>, DomainError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.opinion_id() == opinion_id)
            .cloned()
            .collect())
    }

    async fn update_status_by_opinion(
        &self,
        opinion_id: OpinionId,
        status: ReportStatus,
    ) -> Result<(), DomainError> {
        for report in self
            .reports
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|r| r.opinion_id() == opinion_id)
        {
            report.update_status(status);
        }
        Ok(())
    }
}
