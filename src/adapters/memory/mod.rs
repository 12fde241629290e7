//! In-memory adapters for tests and local runs.
//!
//! These mirror the guarantees of the PostgreSQL adapters, including
//! the (opinion, user) vote uniqueness and the all-or-nothing
//! opinion + auto-vote write.

mod action_item_repository;
mod analysis_repository;
mod conclusion_repository;
mod consent_repository;
mod opinion_repository;
mod report_repository;
mod talk_session_repository;
mod user_repository;
mod vote_repository;

pub use action_item_repository::InMemoryActionItemRepository;
pub use analysis_repository::InMemoryAnalysisRepository;
pub use conclusion_repository::InMemoryConclusionRepository;
pub use consent_repository::InMemoryConsentRepository;
pub use opinion_repository::InMemoryOpinionRepository;
pub use report_repository::InMemoryReportRepository;
pub use talk_session_repository::InMemoryTalkSessionRepository;
pub use user_repository::InMemoryUserRepository;
pub use vote_repository::InMemoryVoteRepository;
