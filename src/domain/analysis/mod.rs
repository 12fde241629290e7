//! AI analysis report staleness model.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisReportId, TalkSessionId, Timestamp};

/// How old a report body may be before regeneration is warranted.
pub const REPORT_STALENESS_MINUTES: i64 = 10;

/// The latest clustering analysis report for a talk session.
///
/// The report body is produced by the external analysis service; this
/// aggregate only tracks freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    id: AnalysisReportId,
    talk_session_id: TalkSessionId,
    /// Markdown body; absent until the first generation completes.
    report: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AnalysisReport {
    pub fn new(
        id: AnalysisReportId,
        talk_session_id: TalkSessionId,
        report: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            talk_session_id,
            report,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> AnalysisReportId {
        self.id
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Whether the report should be regenerated: true when the body is
    /// absent or older than the staleness threshold.
    pub fn should_regenerate(&self, now: Timestamp) -> bool {
        if self.report.is_none() {
            return true;
        }
        now.duration_since(&self.updated_at) > Duration::minutes(REPORT_STALENESS_MINUTES)
    }
}
