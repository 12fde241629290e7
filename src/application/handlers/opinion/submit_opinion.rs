//! SubmitOpinionHandler - posts an opinion with its author self-vote.

use std::sync::Arc;

use image::ImageFormat;

use crate::application::services::TalkSessionAccessControl;
use crate::domain::foundation::{Clock, CommandMetadata, OpinionId, TalkSessionId, VoteId};
use crate::domain::image::{ImageMeta, REFERENCE_IMAGE_RULE};
use crate::domain::opinion::{Opinion, OpinionError};
use crate::domain::vote::{Vote, VoteType};
use crate::ports::{OpinionRepository, TalkSessionRepository};

/// Command to submit an opinion or a reply.
///
/// The target session comes from `talk_session_id`, or from the parent
/// opinion when only `parent_opinion_id` is given.
#[derive(Debug, Clone)]
pub struct SubmitOpinionCommand {
    pub talk_session_id: Option<TalkSessionId>,
    pub parent_opinion_id: Option<OpinionId>,
    pub title: Option<String>,
    pub content: String,
    pub reference_url: Option<String>,
    /// Raw bytes of an optional reference image, validated before any write.
    pub picture: Option<Vec<u8>>,
}

/// Handler for submitting opinions.
pub struct SubmitOpinionHandler {
    opinions: Arc<dyn OpinionRepository>,
    talk_sessions: Arc<dyn TalkSessionRepository>,
    access: Arc<TalkSessionAccessControl>,
    clock: Arc<dyn Clock>,
}

impl SubmitOpinionHandler {
    pub fn new(
        opinions: Arc<dyn OpinionRepository>,
        talk_sessions: Arc<dyn TalkSessionRepository>,
        access: Arc<TalkSessionAccessControl>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            opinions,
            talk_sessions,
            access,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitOpinionCommand,
        metadata: CommandMetadata,
    ) -> Result<Opinion, OpinionError> {
        let talk_session_id = self
            .resolve_session_id(cmd.talk_session_id, cmd.parent_opinion_id)
            .await?;

        let session = self
            .talk_sessions
            .find_by_id(talk_session_id)
            .await?
            .ok_or(OpinionError::TalkSessionNotFound)?;
        if session.is_finished(self.clock.now()) {
            return Err(OpinionError::SessionFinished);
        }

        self.access
            .can_user_join(talk_session_id, metadata.user_id)
            .await?;

        let mut opinion = Opinion::new(
            OpinionId::new(),
            talk_session_id,
            metadata.user_id,
            cmd.parent_opinion_id,
            cmd.title,
            cmd.content,
            cmd.reference_url,
            self.clock.now(),
        )?;

        // Picture validation happens before any persistence so a bad
        // upload never leaves a half-written opinion behind.
        if let Some(bytes) = &cmd.picture {
            let meta = ImageMeta::probe(bytes)?;
            REFERENCE_IMAGE_RULE.check(&meta)?;
            opinion.attach_reference_image(reference_image_path(opinion.id(), meta.format));
        }

        let auto_vote = Vote::new(
            VoteId::new(),
            opinion.id(),
            talk_session_id,
            metadata.user_id,
            VoteType::Agree,
            self.clock.now(),
        )?;

        self.opinions
            .create_with_auto_vote(&opinion, &auto_vote)
            .await?;

        tracing::info!(
            opinion_id = %opinion.id(),
            talk_session_id = %talk_session_id,
            correlation_id = %metadata.correlation_id(),
            "opinion submitted"
        );
        Ok(opinion)
    }

    async fn resolve_session_id(
        &self,
        talk_session_id: Option<TalkSessionId>,
        parent_opinion_id: Option<OpinionId>,
    ) -> Result<TalkSessionId, OpinionError> {
        if let Some(id) = talk_session_id {
            return Ok(id);
        }
        let parent_id = parent_opinion_id.ok_or_else(|| {
            OpinionError::validation(
                "talk_session_id",
                "either a talk session or a parent opinion is required",
            )
        })?;
        let parent = self
            .opinions
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| OpinionError::not_found(parent_id))?;
        Ok(parent.talk_session_id())
    }
}

fn reference_image_path(opinion_id: OpinionId, format: ImageFormat) -> String {
    let ext = match format {
        ImageFormat::Jpeg => "jpg",
        _ => "png",
    };
    format!("opinions/{}/reference.{}", opinion_id, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ConsentService;
    use crate::adapters::memory::{
        InMemoryConsentRepository, InMemoryOpinionRepository, InMemoryTalkSessionRepository,
        InMemoryUserRepository, InMemoryVoteRepository,
    };
    use crate::domain::foundation::{ErrorCode, FixedClock, Timestamp, UserId};
    use crate::domain::talk_session::TalkSession;

    struct Fixture {
        handler: SubmitOpinionHandler,
        votes: Arc<InMemoryVoteRepository>,
        opinions: Arc<InMemoryOpinionRepository>,
        clock: Arc<FixedClock>,
        session_id: TalkSessionId,
    }

    async fn fixture() -> Fixture {
        let talk_sessions: Arc<InMemoryTalkSessionRepository> =
            Arc::new(InMemoryTalkSessionRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let votes = Arc::new(InMemoryVoteRepository::new());
        let opinions = Arc::new(InMemoryOpinionRepository::new(votes.clone()));
        let now = Timestamp::now();
        let clock = Arc::new(FixedClock::new(now));

        let session = TalkSession::new(
            TalkSessionId::new(),
            UserId::new(),
            "theme".to_string(),
            None,
            None,
            now.plus_hours(24),
            None,
            None,
            None,
            now,
        )
        .unwrap();
        let session_id = session.id();
        talk_sessions.create(&session).await.unwrap();

        let consent = Arc::new(ConsentService::new(
            Arc::new(InMemoryConsentRepository::new()),
            talk_sessions.clone(),
            clock.clone(),
        ));
        let access = Arc::new(TalkSessionAccessControl::new(
            talk_sessions.clone(),
            users,
            consent,
        ));
        let handler = SubmitOpinionHandler::new(
            opinions.clone(),
            talk_sessions,
            access,
            clock.clone(),
        );
        Fixture {
            handler,
            votes,
            opinions,
            clock,
            session_id,
        }
    }

    fn command(session_id: TalkSessionId, content: &str) -> SubmitOpinionCommand {
        SubmitOpinionCommand {
            talk_session_id: Some(session_id),
            parent_opinion_id: None,
            title: None,
            content: content.to_string(),
            reference_url: None,
            picture: None,
        }
    }

    #[tokio::test]
    async fn submission_records_opinion_and_author_agree_vote() {
        let f = fixture().await;
        let metadata = CommandMetadata::test_fixture();
        let author = metadata.user_id;

        let opinion = f
            .handler
            .handle(command(f.session_id, "12345"), metadata)
            .await
            .unwrap();

        assert_eq!(opinion.author_id(), Some(author));

        let votes = f.votes.all();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].opinion_id(), opinion.id());
        assert_eq!(votes[0].user_id(), author);
        assert_eq!(votes[0].vote_type(), VoteType::Agree);
    }

    #[tokio::test]
    async fn content_boundaries_reject_before_any_write() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(command(f.session_id, "1234"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(f.votes.all().is_empty());
    }

    #[tokio::test]
    async fn finished_session_rejects_opinions() {
        let f = fixture().await;
        f.clock.set(Timestamp::now().plus_hours(25));
        let err = f
            .handler
            .handle(command(f.session_id, "12345"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert_eq!(err, OpinionError::SessionFinished);
    }

    #[tokio::test]
    async fn reply_resolves_session_through_parent() {
        let f = fixture().await;
        let parent = f
            .handler
            .handle(command(f.session_id, "parent post"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let reply = f
            .handler
            .handle(
                SubmitOpinionCommand {
                    talk_session_id: None,
                    parent_opinion_id: Some(parent.id()),
                    title: None,
                    content: "reply post".to_string(),
                    reference_url: None,
                    picture: None,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(reply.talk_session_id(), f.session_id);

        let stored_parent = f.opinions.find_by_id(parent.id()).await.unwrap().unwrap();
        assert_eq!(stored_parent.reply_count(), 1);
    }

    #[tokio::test]
    async fn invalid_picture_aborts_before_persistence() {
        let f = fixture().await;
        let mut cmd = command(f.session_id, "12345");
        cmd.picture = Some(b"not an image".to_vec());

        let err = f
            .handler
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(f.votes.all().is_empty());
    }
}
