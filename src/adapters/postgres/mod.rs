//! PostgreSQL adapters.
//!
//! One repository per aggregate, all sharing a `PgPool`. Uniqueness
//! rules (one vote per opinion per user, one consent per session per
//! user) are backed by unique indexes and surfaced as conflict errors.

mod action_item_repository;
mod analysis_repository;
mod conclusion_repository;
mod consent_repository;
mod opinion_repository;
mod report_repository;
mod talk_session_repository;
mod user_repository;
mod vote_repository;

pub use action_item_repository::PostgresActionItemRepository;
pub use analysis_repository::PostgresAnalysisRepository;
pub use conclusion_repository::PostgresConclusionRepository;
pub use consent_repository::PostgresConsentRepository;
pub use opinion_repository::PostgresOpinionRepository;
pub use report_repository::PostgresReportRepository;
pub use talk_session_repository::PostgresTalkSessionRepository;
pub use user_repository::PostgresUserRepository;
pub use vote_repository::PostgresVoteRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a database failure into a `DatabaseError` with context.
pub(crate) fn db_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Whether a sqlx error is a PostgreSQL unique constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
