//! Opinion module - posts, replies, and moderation reports.

mod aggregate;
mod errors;
mod report;

pub use errors::OpinionError;

pub use aggregate::{
    Opinion, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH, MIN_CONTENT_LENGTH, MIN_TITLE_LENGTH,
    REDACTION_NOTICE,
};
pub use report::{distinct_reporter_count, Reason, Report, ReportStatus};
