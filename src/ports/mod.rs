//! Ports - trait contracts between the application core and adapters.
//!
//! One port per file. All ports are `async_trait` object-safe traits so
//! handlers can hold `Arc<dyn Port>`.

pub mod action_item_repository;
pub mod analysis_repository;
pub mod analysis_service;
pub mod conclusion_repository;
pub mod consent_repository;
pub mod opinion_repository;
pub mod report_repository;
pub mod talk_session_repository;
pub mod user_repository;
pub mod vote_repository;

pub use action_item_repository::ActionItemRepository;
pub use analysis_repository::AnalysisRepository;
pub use analysis_service::AnalysisService;
pub use conclusion_repository::ConclusionRepository;
pub use consent_repository::ConsentRepository;
pub use opinion_repository::OpinionRepository;
pub use report_repository::ReportRepository;
pub use talk_session_repository::TalkSessionRepository;
pub use user_repository::UserRepository;
pub use vote_repository::VoteRepository;
