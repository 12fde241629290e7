//! TalkSession aggregate entity.
//!
//! A talk session is a scheduled discussion topic. It owns its lifecycle
//! (not-started → started → ended), its participation restrictions, and
//! the flags controlling report visibility. Opinions, votes, and reports
//! reference sessions by ID but are managed by their own modules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId, Timestamp, UserId};
use crate::domain::talk_session::location::Location;
use crate::domain::talk_session::restriction::validate_restriction_keys;

/// Maximum length for a session theme.
pub const MAX_THEME_LENGTH: usize = 100;

/// Maximum length for a session description.
pub const MAX_DESCRIPTION_LENGTH: usize = 40_000;

/// TalkSession aggregate - a scheduled discussion topic.
///
/// # Invariants
///
/// - `theme` is 1-100 characters
/// - `description` is at most 40,000 characters when present
/// - `scheduled_end_time` is in the future at creation and edit time
/// - `restrictions` only holds keys from the restriction registry
/// - once finished (wall clock past `scheduled_end_time`) the session
///   accepts no further votes or opinions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkSession {
    id: TalkSessionId,

    /// User who created and owns this session.
    owner_user_id: UserId,

    theme: String,

    description: Option<String>,

    thumbnail_url: Option<String>,

    /// When the session stops accepting votes and opinions.
    scheduled_end_time: Timestamp,

    created_at: Timestamp,

    /// Optional physical location for place-bound sessions.
    location: Option<Location>,

    city: Option<String>,

    prefecture: Option<String>,

    /// Restriction registry keys participants must satisfy.
    restrictions: Vec<String>,

    /// Hide report counts from non-owners.
    hide_report: bool,

    /// Set by the explicit start transition.
    started: bool,

    /// Set once post-end processing has run.
    end_processed: bool,
}

impl TalkSession {
    /// Create a new talk session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if theme or description lengths are invalid
    /// - `InvalidScheduledEndTime` if the end time is not in the future
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TalkSessionId,
        owner_user_id: UserId,
        theme: String,
        description: Option<String>,
        thumbnail_url: Option<String>,
        scheduled_end_time: Timestamp,
        location: Option<Location>,
        city: Option<String>,
        prefecture: Option<String>,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        Self::validate_theme(&theme)?;
        Self::validate_description(description.as_deref())?;
        Self::validate_end_time(scheduled_end_time, now)?;

        Ok(Self {
            id,
            owner_user_id,
            theme,
            description,
            thumbnail_url,
            scheduled_end_time,
            created_at: now,
            location,
            city,
            prefecture,
            restrictions: Vec::new(),
            hide_report: false,
            started: false,
            end_processed: false,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TalkSessionId,
        owner_user_id: UserId,
        theme: String,
        description: Option<String>,
        thumbnail_url: Option<String>,
        scheduled_end_time: Timestamp,
        created_at: Timestamp,
        location: Option<Location>,
        city: Option<String>,
        prefecture: Option<String>,
        restrictions: Vec<String>,
        hide_report: bool,
        started: bool,
        end_processed: bool,
    ) -> Self {
        Self {
            id,
            owner_user_id,
            theme,
            description,
            thumbnail_url,
            scheduled_end_time,
            created_at,
            location,
            city,
            prefecture,
            restrictions,
            hide_report,
            started,
            end_processed,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> TalkSessionId {
        self.id
    }

    pub fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn scheduled_end_time(&self) -> Timestamp {
        self.scheduled_end_time
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn prefecture(&self) -> Option<&str> {
        self.prefecture.as_deref()
    }

    pub fn restrictions(&self) -> &[String] {
        &self.restrictions
    }

    pub fn hide_report(&self) -> bool {
        self.hide_report
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_end_processed(&self) -> bool {
        self.end_processed
    }

    /// Whether the session has finished accepting votes.
    ///
    /// Pure wall-clock comparison; the end transition is separate.
    pub fn is_finished(&self, now: Timestamp) -> bool {
        self.scheduled_end_time.is_before(&now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_user_id == user_id
    }

    /// Validates that the user owns this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the owner
    pub fn authorize_owner(&self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not the owner of this talk session",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the theme, re-validating its length.
    pub fn change_theme(&mut self, theme: String) -> Result<(), DomainError> {
        Self::validate_theme(&theme)?;
        self.theme = theme;
        Ok(())
    }

    /// Replace the description, re-validating its length.
    pub fn change_description(&mut self, description: Option<String>) -> Result<(), DomainError> {
        Self::validate_description(description.as_deref())?;
        self.description = description;
        Ok(())
    }

    pub fn change_thumbnail_url(&mut self, url: Option<String>) {
        self.thumbnail_url = url;
    }

    /// Replace the scheduled end time; must still lie in the future.
    pub fn change_scheduled_end_time(
        &mut self,
        scheduled_end_time: Timestamp,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        Self::validate_end_time(scheduled_end_time, now)?;
        self.scheduled_end_time = scheduled_end_time;
        Ok(())
    }

    pub fn change_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    pub fn change_city(&mut self, city: Option<String>) {
        self.city = city;
    }

    pub fn change_prefecture(&mut self, prefecture: Option<String>) {
        self.prefecture = prefecture;
    }

    /// Replace the restriction list.
    ///
    /// Every key is checked against the registry; all invalid keys are
    /// collected into one aggregated error.
    ///
    /// # Errors
    ///
    /// - `InvalidRestrictionAttribute` naming every unknown key
    pub fn update_restrictions(&mut self, keys: Vec<String>) -> Result<(), DomainError> {
        validate_restriction_keys(&keys)?;
        self.restrictions = keys;
        Ok(())
    }

    pub fn set_report_visibility(&mut self, hide: bool) {
        self.hide_report = hide;
    }

    /// Explicit one-way start transition.
    ///
    /// # Errors
    ///
    /// - `SessionAlreadyStarted` if already started
    pub fn start_session(&mut self) -> Result<(), DomainError> {
        if self.started {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyStarted,
                "Talk session has already been started",
            ));
        }
        self.started = true;
        Ok(())
    }

    /// Explicit one-way end transition, run once after the scheduled end.
    ///
    /// # Errors
    ///
    /// - `SessionNotFinished` if the scheduled end time has not passed
    /// - `SessionAlreadyEnded` if end processing already ran
    pub fn end_session(&mut self, now: Timestamp) -> Result<(), DomainError> {
        if !self.is_finished(now) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFinished,
                "Talk session has not reached its scheduled end time",
            ));
        }
        if self.end_processed {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyEnded,
                "Talk session end processing has already run",
            ));
        }
        self.end_processed = true;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_theme(theme: &str) -> Result<(), DomainError> {
        let len = theme.chars().count();
        if len == 0 {
            return Err(DomainError::validation("theme", "theme cannot be empty"));
        }
        if len > MAX_THEME_LENGTH {
            return Err(DomainError::validation(
                "theme",
                format!(
                    "theme must be at most {} characters, got {}",
                    MAX_THEME_LENGTH, len
                ),
            ));
        }
        Ok(())
    }

    fn validate_description(description: Option<&str>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            let len = desc.chars().count();
            if len > MAX_DESCRIPTION_LENGTH {
                return Err(DomainError::validation(
                    "description",
                    format!(
                        "description must be at most {} characters, got {}",
                        MAX_DESCRIPTION_LENGTH, len
                    ),
                ));
            }
        }
        Ok(())
    }

    fn validate_end_time(end: Timestamp, now: Timestamp) -> Result<(), DomainError> {
        if !end.is_after(&now) {
            return Err(DomainError::new(
                ErrorCode::InvalidScheduledEndTime,
                "scheduled end time must be in the future",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_session(now: Timestamp) -> TalkSession {
        TalkSession::new(
            TalkSessionId::new(),
            UserId::new(),
            "地域の交通について".to_string(),
            None,
            None,
            now.plus_hours(24),
            None,
            None,
            None,
            now,
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_past_end_time() {
        let now = Timestamp::now();
        let result = TalkSession::new(
            TalkSessionId::new(),
            UserId::new(),
            "t".to_string(),
            None,
            None,
            now.minus_minutes(1),
            None,
            None,
            None,
            now,
        );
        assert_eq!(
            result.unwrap_err().code,
            ErrorCode::InvalidScheduledEndTime
        );
    }

    #[test]
    fn new_rejects_overlong_theme() {
        let now = Timestamp::now();
        let result = TalkSession::new(
            TalkSessionId::new(),
            UserId::new(),
            "あ".repeat(MAX_THEME_LENGTH + 1),
            None,
            None,
            now.plus_hours(1),
            None,
            None,
            None,
            now,
        );
        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn theme_at_max_length_is_accepted() {
        let now = Timestamp::now();
        let session = TalkSession::new(
            TalkSessionId::new(),
            UserId::new(),
            "あ".repeat(MAX_THEME_LENGTH),
            None,
            None,
            now.plus_hours(1),
            None,
            None,
            None,
            now,
        );
        assert!(session.is_ok());
    }

    #[test]
    fn is_finished_follows_wall_clock() {
        let now = Timestamp::now();
        let session = base_session(now);
        assert!(!session.is_finished(now));
        assert!(!session.is_finished(now.plus_hours(24)));
        assert!(session.is_finished(now.plus_hours(25)));
    }

    #[test]
    fn update_restrictions_aggregates_invalid_keys() {
        let now = Timestamp::now();
        let mut session = base_session(now);
        let err = session
            .update_restrictions(vec![
                "demographics.gender".to_string(),
                "bogus.key".to_string(),
                "another.bogus".to_string(),
            ])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRestrictionAttribute);
        assert!(err.message.contains("bogus.key"));
        assert!(err.message.contains("another.bogus"));
        assert!(session.restrictions().is_empty());
    }

    #[test]
    fn update_restrictions_accepts_registry_keys() {
        let now = Timestamp::now();
        let mut session = base_session(now);
        session
            .update_restrictions(vec![
                "auth.register".to_string(),
                "demographics.city".to_string(),
            ])
            .unwrap();
        assert_eq!(session.restrictions().len(), 2);
    }

    #[test]
    fn start_session_is_one_way() {
        let now = Timestamp::now();
        let mut session = base_session(now);
        session.start_session().unwrap();
        let err = session.start_session().unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionAlreadyStarted);
    }

    #[test]
    fn end_session_requires_finished() {
        let now = Timestamp::now();
        let mut session = base_session(now);

        let err = session.end_session(now).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFinished);

        let later = now.plus_hours(25);
        session.end_session(later).unwrap();
        let err = session.end_session(later).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionAlreadyEnded);
    }

    #[test]
    fn report_visibility_toggles() {
        let now = Timestamp::now();
        let mut session = base_session(now);
        assert!(!session.hide_report());

        session.set_report_visibility(true);
        assert!(session.hide_report());
        session.set_report_visibility(false);
        assert!(!session.hide_report());
    }

    #[test]
    fn change_scheduled_end_time_revalidates() {
        let now = Timestamp::now();
        let mut session = base_session(now);
        let err = session
            .change_scheduled_end_time(now.minus_minutes(5), now)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidScheduledEndTime);

        session
            .change_scheduled_end_time(now.plus_hours(48), now)
            .unwrap();
        assert_eq!(session.scheduled_end_time(), now.plus_hours(48));
    }

    #[test]
    fn authorize_owner_rejects_others() {
        let now = Timestamp::now();
        let session = base_session(now);
        assert!(session.authorize_owner(session.owner_user_id()).is_ok());
        let err = session.authorize_owner(UserId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
