//! Integration tests for the deliberation flow.
//!
//! These tests verify the end-to-end path:
//! 1. An owner opens a talk session
//! 2. A participant submits an opinion (with its automatic agree vote)
//! 3. Other participants vote, which fires the analysis trigger
//! 4. Moderation resolves reported opinions
//!
//! Uses in-memory adapters so the flow runs without external dependencies.

use std::sync::Arc;
use std::time::Duration;

use agora::adapters::analysis::RecordingAnalysisService;
use agora::adapters::memory::{
    InMemoryConsentRepository, InMemoryOpinionRepository, InMemoryReportRepository,
    InMemoryTalkSessionRepository, InMemoryUserRepository, InMemoryVoteRepository,
};
use agora::application::handlers::opinion::{
    ReportOpinionCommand, ReportOpinionHandler, SolveReportCommand, SolveReportHandler,
    SubmitOpinionCommand, SubmitOpinionHandler,
};
use agora::application::handlers::talk_session::{
    StartTalkSessionCommand, StartTalkSessionHandler,
};
use agora::application::handlers::vote::{CastVoteCommand, CastVoteHandler};
use agora::application::services::{ConsentService, TalkSessionAccessControl};
use agora::domain::foundation::{CommandMetadata, SystemClock, Timestamp, UserId};
use agora::domain::opinion::{ReportStatus, REDACTION_NOTICE};
use agora::domain::user::User;
use agora::domain::vote::{VoteError, VoteType};
use agora::ports::{OpinionRepository, ReportRepository, UserRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    opinions: Arc<InMemoryOpinionRepository>,
    votes: Arc<InMemoryVoteRepository>,
    reports: Arc<InMemoryReportRepository>,
    users: Arc<InMemoryUserRepository>,
    analysis: Arc<RecordingAnalysisService>,
    start_session: StartTalkSessionHandler,
    submit_opinion: SubmitOpinionHandler,
    cast_vote: CastVoteHandler,
    report_opinion: ReportOpinionHandler,
    solve_report: SolveReportHandler,
}

impl TestApp {
    fn new() -> Self {
        let clock = Arc::new(SystemClock);
        let talk_sessions = Arc::new(InMemoryTalkSessionRepository::new());
        let votes = Arc::new(InMemoryVoteRepository::new());
        let opinions = Arc::new(InMemoryOpinionRepository::new(votes.clone()));
        let reports = Arc::new(InMemoryReportRepository::new());
        let consents = Arc::new(InMemoryConsentRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let analysis_reports = Arc::new(agora::adapters::memory::InMemoryAnalysisRepository::new());
        let analysis = Arc::new(RecordingAnalysisService::new());

        let consent_service = Arc::new(ConsentService::new(
            consents,
            talk_sessions.clone(),
            clock.clone(),
        ));
        let access = Arc::new(TalkSessionAccessControl::new(
            talk_sessions.clone(),
            users.clone(),
            consent_service,
        ));

        Self {
            start_session: StartTalkSessionHandler::new(
                talk_sessions.clone(),
                users.clone(),
                clock.clone(),
            ),
            submit_opinion: SubmitOpinionHandler::new(
                opinions.clone(),
                talk_sessions.clone(),
                access.clone(),
                clock.clone(),
            ),
            cast_vote: CastVoteHandler::new(
                opinions.clone(),
                talk_sessions.clone(),
                votes.clone(),
                access,
                analysis_reports,
                analysis.clone(),
                clock,
            ),
            report_opinion: ReportOpinionHandler::new(
                opinions.clone(),
                reports.clone(),
                Arc::new(SystemClock),
            ),
            solve_report: SolveReportHandler::new(
                opinions.clone(),
                reports.clone(),
                talk_sessions.clone(),
            ),
            opinions,
            votes,
            reports,
            users,
            analysis,
        }
    }

    async fn register_user(&self, name: &str) -> UserId {
        let user = User::new(UserId::new(), name.to_string(), true, Timestamp::now()).unwrap();
        let id = user.id();
        self.users.store(&user).await.unwrap();
        id
    }
}

fn session_command(theme: &str) -> StartTalkSessionCommand {
    StartTalkSessionCommand {
        theme: theme.to_string(),
        description: None,
        thumbnail_url: None,
        scheduled_end_time: Timestamp::now().plus_hours(24),
        location: None,
        city: None,
        prefecture: None,
        restrictions: vec![],
    }
}

fn opinion_command(
    session: agora::domain::foundation::TalkSessionId,
    content: &str,
) -> SubmitOpinionCommand {
    SubmitOpinionCommand {
        talk_session_id: Some(session),
        parent_opinion_id: None,
        title: None,
        content: content.to_string(),
        reference_url: None,
        picture: None,
    }
}

/// Polls until the condition holds or a short deadline passes.
async fn wait_for<F: Fn() -> bool>(condition: F) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn session_opinion_vote_flow_triggers_analysis() {
    let app = TestApp::new();
    let owner = app.register_user("owner").await;
    let voter = app.register_user("voter").await;

    let session = app
        .start_session
        .handle(session_command("地域の交通をどうするか"), CommandMetadata::new(owner))
        .await
        .unwrap();

    let opinion = app
        .submit_opinion
        .handle(
            opinion_command(session.id(), "バスの本数を増やすべきだ"),
            CommandMetadata::new(owner),
        )
        .await
        .unwrap();

    // The author's automatic agree vote is already in place.
    assert_eq!(app.votes.all().len(), 1);

    let vote = app
        .cast_vote
        .handle(
            CastVoteCommand {
                opinion_id: opinion.id(),
                vote_type: VoteType::Agree,
            },
            CommandMetadata::new(voter),
        )
        .await
        .unwrap();

    assert_eq!(vote.vote_type(), VoteType::Agree);
    assert_eq!(app.votes.all().len(), 2);

    // The vote itself never blocks on analysis; the trigger lands async.
    let analysis = app.analysis.clone();
    let session_id = session.id();
    wait_for(move || analysis.start_calls().contains(&session_id)).await;
    let analysis = app.analysis.clone();
    wait_for(move || analysis.generate_calls().contains(&session_id)).await;

    // Opinion content untouched by the whole flow.
    let stored = app.opinions.find_by_id(opinion.id()).await.unwrap().unwrap();
    assert_eq!(stored.content(), "バスの本数を増やすべきだ");
}

#[tokio::test]
async fn concurrent_duplicate_votes_resolve_to_one() {
    let app = TestApp::new();
    let owner = app.register_user("owner").await;
    let voter = app.register_user("voter").await;

    let session = app
        .start_session
        .handle(session_command("valid theme"), CommandMetadata::new(owner))
        .await
        .unwrap();
    let opinion = app
        .submit_opinion
        .handle(
            opinion_command(session.id(), "an opinion worth voting on"),
            CommandMetadata::new(owner),
        )
        .await
        .unwrap();

    let attempts = (0..8).map(|_| {
        app.cast_vote.handle(
            CastVoteCommand {
                opinion_id: opinion.id(),
                vote_type: VoteType::Disagree,
            },
            CommandMetadata::new(voter),
        )
    });
    let results = futures::future::join_all(attempts).await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| matches!(r, Err(VoteError::AlreadyVoted))));

    // Author auto vote plus exactly one voter vote.
    assert_eq!(app.votes.all().len(), 2);
}

#[tokio::test]
async fn reported_opinion_is_redacted_when_owner_deletes() {
    let app = TestApp::new();
    let owner = app.register_user("owner").await;
    let reporter = app.register_user("reporter").await;

    let session = app
        .start_session
        .handle(session_command("moderation"), CommandMetadata::new(owner))
        .await
        .unwrap();
    let opinion = app
        .submit_opinion
        .handle(
            opinion_command(session.id(), "a post that gets reported"),
            CommandMetadata::new(owner),
        )
        .await
        .unwrap();

    app.report_opinion
        .handle(
            ReportOpinionCommand {
                opinion_id: opinion.id(),
                reason_code: 2,
                reason_text: None,
            },
            CommandMetadata::new(reporter),
        )
        .await
        .unwrap();

    app.solve_report
        .handle(
            SolveReportCommand {
                opinion_id: opinion.id(),
                status: ReportStatus::Deleted,
            },
            CommandMetadata::new(owner),
        )
        .await
        .unwrap();

    let stored = app.opinions.find_by_id(opinion.id()).await.unwrap().unwrap();
    assert_eq!(stored.content(), REDACTION_NOTICE);
    assert!(stored.is_redacted());

    let reports = app.reports.find_by_opinion_id(opinion.id()).await.unwrap();
    assert!(!reports.is_empty());
    assert!(reports.iter().all(|r| r.status() == ReportStatus::Deleted));
}
