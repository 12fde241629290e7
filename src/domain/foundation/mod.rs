//! Shared foundation types for the domain layer.

pub mod clock;
pub mod command;
pub mod errors;
pub mod ids;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ActionItemId, AnalysisReportId, OpinionId, ReportId, TalkSessionId, UserId, VoteId,
};
pub use timestamp::Timestamp;
