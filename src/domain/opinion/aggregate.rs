//! Opinion aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, OpinionId, ReportId, TalkSessionId, Timestamp, UserId,
};
use crate::domain::opinion::report::{Reason, Report};

/// Valid content length range (Unicode scalar counts).
pub const MIN_CONTENT_LENGTH: usize = 5;
pub const MAX_CONTENT_LENGTH: usize = 140;

/// Valid title length range when a title is present.
pub const MIN_TITLE_LENGTH: usize = 5;
pub const MAX_TITLE_LENGTH: usize = 50;

/// Content shown in place of an opinion removed by moderation.
pub const REDACTION_NOTICE: &str = "この投稿は運営により削除されました";

/// Opinion aggregate - a post or a reply within a talk session.
///
/// # Invariants
///
/// - `content` is 5-140 characters
/// - `title` is 5-50 characters when present
/// - an opinion is never its own parent
/// - created once; the only mutations are reference-image attachment and
///   moderation redaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    id: OpinionId,

    talk_session_id: TalkSessionId,

    /// Author; cleared when the opinion is redacted by moderation.
    author_id: Option<UserId>,

    /// Present when this opinion replies to another.
    parent_opinion_id: Option<OpinionId>,

    title: Option<String>,

    content: String,

    created_at: Timestamp,

    reference_url: Option<String>,

    reference_image_url: Option<String>,

    /// IDs of direct replies (not owned, not recursive).
    reply_ids: Vec<OpinionId>,
}

impl Opinion {
    /// Create a new opinion.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` on content/title length violations or
    ///   self-parenting
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OpinionId,
        talk_session_id: TalkSessionId,
        author_id: UserId,
        parent_opinion_id: Option<OpinionId>,
        title: Option<String>,
        content: String,
        reference_url: Option<String>,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        Self::validate_content(&content)?;
        Self::validate_title(title.as_deref())?;
        if parent_opinion_id == Some(id) {
            return Err(DomainError::validation(
                "parent_opinion_id",
                "an opinion cannot be its own parent",
            ));
        }

        Ok(Self {
            id,
            talk_session_id,
            author_id: Some(author_id),
            parent_opinion_id,
            title,
            content,
            created_at,
            reference_url,
            reference_image_url: None,
            reply_ids: Vec::new(),
        })
    }

    /// Reconstitute an opinion from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: OpinionId,
        talk_session_id: TalkSessionId,
        author_id: Option<UserId>,
        parent_opinion_id: Option<OpinionId>,
        title: Option<String>,
        content: String,
        created_at: Timestamp,
        reference_url: Option<String>,
        reference_image_url: Option<String>,
        reply_ids: Vec<OpinionId>,
    ) -> Self {
        Self {
            id,
            talk_session_id,
            author_id,
            parent_opinion_id,
            title,
            content,
            created_at,
            reference_url,
            reference_image_url,
            reply_ids,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> OpinionId {
        self.id
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    pub fn parent_opinion_id(&self) -> Option<OpinionId> {
        self.parent_opinion_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.reference_url.as_deref()
    }

    pub fn reference_image_url(&self) -> Option<&str> {
        self.reference_image_url.as_deref()
    }

    /// Number of DIRECT replies only; nested replies are not counted.
    pub fn reply_count(&self) -> usize {
        self.reply_ids.len()
    }

    pub fn is_reply(&self) -> bool {
        self.parent_opinion_id.is_some()
    }

    /// Whether moderation has removed this opinion's content.
    pub fn is_redacted(&self) -> bool {
        self.author_id.is_none()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a reference image after upload validation.
    pub fn attach_reference_image(&mut self, url: String) {
        self.reference_image_url = Some(url);
    }

    /// Register a direct reply.
    pub fn add_reply(&mut self, reply_id: OpinionId) {
        if !self.reply_ids.contains(&reply_id) {
            self.reply_ids.push(reply_id);
        }
    }

    /// Mask this opinion after moderation resolves its reports as deleted.
    ///
    /// Content is replaced with a fixed notice and the author is cleared;
    /// the row itself survives so reply threads keep their shape.
    pub fn redact(&mut self) {
        self.content = REDACTION_NOTICE.to_string();
        self.title = None;
        self.author_id = None;
        self.reference_url = None;
        self.reference_image_url = None;
    }

    /// Build a fresh unsolved report against this opinion.
    pub fn report(
        &self,
        reporter_id: UserId,
        reason: Reason,
        reason_text: Option<String>,
        now: Timestamp,
    ) -> Report {
        Report::new(
            ReportId::new(),
            self.id,
            self.talk_session_id,
            reporter_id,
            reason,
            reason_text,
            now,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_content(content: &str) -> Result<(), DomainError> {
        let len = content.chars().count();
        if !(MIN_CONTENT_LENGTH..=MAX_CONTENT_LENGTH).contains(&len) {
            return Err(DomainError::validation(
                "content",
                format!(
                    "content must be between {} and {} characters, got {}",
                    MIN_CONTENT_LENGTH, MAX_CONTENT_LENGTH, len
                ),
            ));
        }
        Ok(())
    }

    fn validate_title(title: Option<&str>) -> Result<(), DomainError> {
        if let Some(title) = title {
            let len = title.chars().count();
            if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
                return Err(DomainError::validation(
                    "title",
                    format!(
                        "title must be between {} and {} characters, got {}",
                        MIN_TITLE_LENGTH, MAX_TITLE_LENGTH, len
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opinion::report::ReportStatus;

    fn opinion_with_content(content: &str) -> Result<Opinion, DomainError> {
        Opinion::new(
            OpinionId::new(),
            TalkSessionId::new(),
            UserId::new(),
            None,
            None,
            content.to_string(),
            None,
            Timestamp::now(),
        )
    }

    #[test]
    fn content_boundaries_are_five_to_one_forty() {
        assert!(opinion_with_content(&"a".repeat(4)).is_err());
        assert!(opinion_with_content(&"a".repeat(5)).is_ok());
        assert!(opinion_with_content(&"a".repeat(140)).is_ok());
        assert!(opinion_with_content(&"a".repeat(141)).is_err());
    }

    #[test]
    fn content_length_counts_unicode_scalars() {
        // 140 Japanese characters are 140 chars even at 420 bytes
        assert!(opinion_with_content(&"あ".repeat(140)).is_ok());
        assert!(opinion_with_content(&"あ".repeat(141)).is_err());
    }

    #[test]
    fn title_boundaries_apply_only_when_present() {
        let make = |title: Option<&str>| {
            Opinion::new(
                OpinionId::new(),
                TalkSessionId::new(),
                UserId::new(),
                None,
                title.map(String::from),
                "12345".to_string(),
                None,
                Timestamp::now(),
            )
        };
        assert!(make(None).is_ok());
        assert!(make(Some("abcd")).is_err());
        assert!(make(Some("abcde")).is_ok());
        assert!(make(Some(&"a".repeat(50))).is_ok());
        assert!(make(Some(&"a".repeat(51))).is_err());
    }

    #[test]
    fn self_parenting_is_rejected() {
        let id = OpinionId::new();
        let result = Opinion::new(
            id,
            TalkSessionId::new(),
            UserId::new(),
            Some(id),
            None,
            "valid content".to_string(),
            None,
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn reply_count_is_direct_children_only() {
        let mut parent = opinion_with_content("parent content").unwrap();
        let child = OpinionId::new();
        parent.add_reply(child);
        parent.add_reply(child);
        parent.add_reply(OpinionId::new());
        assert_eq!(parent.reply_count(), 2);
    }

    #[test]
    fn redact_masks_content_and_clears_author() {
        let mut opinion = opinion_with_content("offensive post!").unwrap();
        opinion.attach_reference_image("https://img.example/x.png".to_string());
        opinion.redact();

        assert_eq!(opinion.content(), REDACTION_NOTICE);
        assert!(opinion.author_id().is_none());
        assert!(opinion.reference_image_url().is_none());
        assert!(opinion.is_redacted());
    }

    proptest::proptest! {
        #[test]
        fn content_acceptance_matches_char_count(content in "[あ-んa-z0-9 ]{0,160}") {
            let len = content.chars().count();
            let result = opinion_with_content(&content);
            proptest::prop_assert_eq!(
                result.is_ok(),
                (MIN_CONTENT_LENGTH..=MAX_CONTENT_LENGTH).contains(&len)
            );
        }
    }

    #[test]
    fn report_factory_builds_unsolved_report() {
        let opinion = opinion_with_content("report me now").unwrap();
        let reporter = UserId::new();
        let report = opinion.report(reporter, Reason::Harassment, None, Timestamp::now());

        assert_eq!(report.opinion_id(), opinion.id());
        assert_eq!(report.talk_session_id(), opinion.talk_session_id());
        assert_eq!(report.reporter_id(), reporter);
        assert_eq!(report.status(), ReportStatus::Unsolved);
    }
}
