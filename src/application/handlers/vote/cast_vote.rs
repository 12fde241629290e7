//! CastVoteHandler - records a vote and kicks off analysis.
//!
//! The analysis trigger is fire-and-forget: it runs on a detached task
//! that survives the caller, carries the current tracing span, and only
//! logs its failures. Vote latency must never depend on the external
//! clustering service.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::services::TalkSessionAccessControl;
use crate::domain::foundation::{Clock, CommandMetadata, OpinionId, VoteId};
use crate::domain::vote::{Vote, VoteError, VoteType};
use crate::ports::{
    AnalysisRepository, AnalysisService, OpinionRepository, TalkSessionRepository, VoteRepository,
};

/// Command to vote on an opinion.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub opinion_id: OpinionId,
    pub vote_type: VoteType,
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    opinions: Arc<dyn OpinionRepository>,
    talk_sessions: Arc<dyn TalkSessionRepository>,
    votes: Arc<dyn VoteRepository>,
    access: Arc<TalkSessionAccessControl>,
    analysis_reports: Arc<dyn AnalysisRepository>,
    analysis: Arc<dyn AnalysisService>,
    clock: Arc<dyn Clock>,
}

impl CastVoteHandler {
    pub fn new(
        opinions: Arc<dyn OpinionRepository>,
        talk_sessions: Arc<dyn TalkSessionRepository>,
        votes: Arc<dyn VoteRepository>,
        access: Arc<TalkSessionAccessControl>,
        analysis_reports: Arc<dyn AnalysisRepository>,
        analysis: Arc<dyn AnalysisService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            opinions,
            talk_sessions,
            votes,
            access,
            analysis_reports,
            analysis,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CastVoteCommand,
        metadata: CommandMetadata,
    ) -> Result<Vote, VoteError> {
        let opinion = self
            .opinions
            .find_by_id(cmd.opinion_id)
            .await
            .map_err(VoteError::from)?
            .ok_or(VoteError::OpinionNotFound(cmd.opinion_id))?;

        let talk_session_id = opinion.talk_session_id();
        let session = self
            .talk_sessions
            .find_by_id(talk_session_id)
            .await
            .map_err(VoteError::from)?
            .ok_or(VoteError::TalkSessionNotFound(talk_session_id))?;

        if session.is_finished(self.clock.now()) {
            return Err(VoteError::SessionFinished);
        }

        self.access
            .can_user_join(talk_session_id, metadata.user_id)
            .await?;

        if self
            .votes
            .find_by_opinion_and_user(cmd.opinion_id, metadata.user_id)
            .await?
            .is_some()
        {
            return Err(VoteError::AlreadyVoted);
        }

        let vote = Vote::new(
            VoteId::new(),
            cmd.opinion_id,
            talk_session_id,
            metadata.user_id,
            cmd.vote_type,
            self.clock.now(),
        )?;
        self.votes.create(&vote).await?;

        tracing::info!(
            opinion_id = %cmd.opinion_id,
            vote_type = %cmd.vote_type,
            correlation_id = %metadata.correlation_id(),
            "vote recorded"
        );

        // The vote is committed; everything below is best-effort and
        // must not delay or fail the response.
        self.dispatch_analysis(session.id());

        Ok(vote)
    }

    /// Spawns the detached analysis kick-off.
    ///
    /// Detached from the request so the caller's completion never
    /// cancels it; the current tracing span rides along for correlation.
    fn dispatch_analysis(&self, talk_session_id: crate::domain::foundation::TalkSessionId) {
        let analysis = self.analysis.clone();
        let analysis_reports = self.analysis_reports.clone();
        let clock = self.clock.clone();

        tokio::spawn(
            async move {
                if let Err(err) = analysis.start_analysis(talk_session_id).await {
                    tracing::warn!(%talk_session_id, error = %err, "start_analysis failed");
                }

                let report = match analysis_reports
                    .find_by_talk_session_id(talk_session_id)
                    .await
                {
                    Ok(report) => report,
                    Err(err) => {
                        tracing::warn!(%talk_session_id, error = %err, "analysis report lookup failed");
                        return;
                    }
                };

                let needs_regeneration = report
                    .map(|r| r.should_regenerate(clock.now()))
                    .unwrap_or(true);
                if needs_regeneration {
                    if let Err(err) = analysis.generate_report(talk_session_id).await {
                        tracing::warn!(%talk_session_id, error = %err, "generate_report failed");
                    }
                }
            }
            .instrument(tracing::Span::current()),
        );
    }
}
