//! Report moderation aggregate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    OpinionId, ReportId, TalkSessionId, Timestamp, UserId, ValidationError,
};

/// Why an opinion was reported.
///
/// Unknown integer codes coerce to `Other` at construction; reports from
/// older clients must never be dropped over an unrecognized reason code.
/// Status parsing, by contrast, stays strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Inappropriate,
    Spam,
    Harassment,
    Other,
}

impl Reason {
    /// Converts an integer code, coercing unknown values to `Other`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Reason::Inappropriate,
            2 => Reason::Spam,
            3 => Reason::Harassment,
            _ => Reason::Other,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Reason::Inappropriate => 1,
            Reason::Spam => 2,
            Reason::Harassment => 3,
            Reason::Other => 4,
        }
    }

    /// Label shown in moderation views.
    pub fn label(&self) -> &'static str {
        match self {
            Reason::Inappropriate => "不適切な内容",
            Reason::Spam => "スパム",
            Reason::Harassment => "誹謗中傷",
            Reason::Other => "その他",
        }
    }

    /// All reasons with their codes and labels, for selection UIs.
    pub fn catalog() -> Vec<(i32, &'static str)> {
        [
            Reason::Inappropriate,
            Reason::Spam,
            Reason::Harassment,
            Reason::Other,
        ]
        .iter()
        .map(|r| (r.as_i32(), r.label()))
        .collect()
    }
}

/// Moderation state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Unsolved,
    Deleted,
    Hold,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Unsolved => "unsolved",
            ReportStatus::Deleted => "deleted",
            ReportStatus::Hold => "hold",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unsolved" => Ok(ReportStatus::Unsolved),
            "deleted" => Ok(ReportStatus::Deleted),
            "hold" => Ok(ReportStatus::Hold),
            other => Err(ValidationError::invalid_format(
                "report_status",
                format!("unknown report status '{}'", other),
            )),
        }
    }
}

/// A moderation flag against an opinion.
///
/// All reports against one opinion transition together when the session
/// owner resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    id: ReportId,
    opinion_id: OpinionId,
    talk_session_id: TalkSessionId,
    reporter_id: UserId,
    reason: Reason,
    reason_text: Option<String>,
    status: ReportStatus,
    created_at: Timestamp,
}

impl Report {
    /// Creates a fresh unsolved report.
    pub fn new(
        id: ReportId,
        opinion_id: OpinionId,
        talk_session_id: TalkSessionId,
        reporter_id: UserId,
        reason: Reason,
        reason_text: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            opinion_id,
            talk_session_id,
            reporter_id,
            reason,
            reason_text,
            status: ReportStatus::Unsolved,
            created_at,
        }
    }

    /// Reconstitutes a report from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReportId,
        opinion_id: OpinionId,
        talk_session_id: TalkSessionId,
        reporter_id: UserId,
        reason: Reason,
        reason_text: Option<String>,
        status: ReportStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            opinion_id,
            talk_session_id,
            reporter_id,
            reason,
            reason_text,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn opinion_id(&self) -> OpinionId {
        self.opinion_id
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn reporter_id(&self) -> UserId {
        self.reporter_id
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }

    pub fn reason_text(&self) -> Option<&str> {
        self.reason_text.as_deref()
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn update_status(&mut self, status: ReportStatus) {
        self.status = status;
    }
}

/// Counts distinct reporters across a set of reports.
///
/// A single user filing several reports against the same opinion counts
/// once in the detail view.
pub fn distinct_reporter_count(reports: &[Report]) -> usize {
    let mut reporters: Vec<UserId> = reports.iter().map(|r| r.reporter_id()).collect();
    reporters.sort_unstable_by_key(|id| *id.as_uuid());
    reporters.dedup();
    reporters.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_by(reporter: UserId) -> Report {
        Report::new(
            ReportId::new(),
            OpinionId::new(),
            TalkSessionId::new(),
            reporter,
            Reason::Spam,
            None,
            Timestamp::now(),
        )
    }

    #[test]
    fn unknown_reason_codes_coerce_to_other() {
        assert_eq!(Reason::from_i32(3), Reason::Harassment);
        assert_eq!(Reason::from_i32(99), Reason::Other);
        assert_eq!(Reason::from_i32(0), Reason::Other);
    }

    #[test]
    fn status_parsing_is_strict() {
        assert_eq!(
            "unsolved".parse::<ReportStatus>().unwrap(),
            ReportStatus::Unsolved
        );
        assert_eq!("hold".parse::<ReportStatus>().unwrap(), ReportStatus::Hold);
        assert!("resolved".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn new_reports_start_unsolved() {
        let report = report_by(UserId::new());
        assert_eq!(report.status(), ReportStatus::Unsolved);
    }

    #[test]
    fn catalog_lists_all_reasons() {
        let catalog = Reason::catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[0], (1, "不適切な内容"));
        assert_eq!(catalog[3], (4, "その他"));
    }

    #[test]
    fn distinct_reporter_count_dedupes_by_reporter() {
        let repeat = UserId::new();
        let reports = vec![report_by(repeat), report_by(repeat), report_by(UserId::new())];
        assert_eq!(distinct_reporter_count(&reports), 2);
    }
}
