//! Access control for talk session participation.

use std::sync::Arc;

use crate::application::services::ConsentService;
use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId, UserId};
use crate::domain::talk_session::unmet_restrictions;
use crate::ports::{TalkSessionRepository, UserRepository};

/// Checks whether a user may join (post, vote in) a talk session.
pub struct TalkSessionAccessControl {
    talk_sessions: Arc<dyn TalkSessionRepository>,
    users: Arc<dyn UserRepository>,
    consent: Arc<ConsentService>,
}

impl TalkSessionAccessControl {
    pub fn new(
        talk_sessions: Arc<dyn TalkSessionRepository>,
        users: Arc<dyn UserRepository>,
        consent: Arc<ConsentService>,
    ) -> Self {
        Self {
            talk_sessions,
            users,
            consent,
        }
    }

    /// Validates the user against the session's restrictions and consent.
    ///
    /// The owner always passes. Unrestricted sessions admit everyone.
    ///
    /// # Errors
    ///
    /// - `TalkSessionNotFound` if the session doesn't exist
    /// - `UserNotFound` if the user doesn't exist
    /// - `RestrictionNotSatisfied` naming every unmet key
    /// - `ConsentRequired` when consent has not been taken
    pub async fn can_user_join(
        &self,
        talk_session_id: TalkSessionId,
        user_id: UserId,
    ) -> Result<(), DomainError> {
        let session = self
            .talk_sessions
            .find_by_id(talk_session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TalkSessionNotFound,
                    format!("Talk session not found: {}", talk_session_id),
                )
                .with_detail("talk_session_id", talk_session_id.to_string())
            })?;

        if session.is_owner(user_id) {
            return Ok(());
        }
        if session.restrictions().is_empty() {
            return Ok(());
        }

        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user_id),
            )
        })?;

        let unmet = unmet_restrictions(session.restrictions(), &user);
        if !unmet.is_empty() {
            return Err(DomainError::new(
                ErrorCode::RestrictionNotSatisfied,
                format!("Restrictions not satisfied: {}", unmet.join(", ")),
            )
            .with_detail("unmet_keys", unmet.join(",")));
        }

        if !self.consent.has_consented_to(&session, user_id).await? {
            return Err(DomainError::new(
                ErrorCode::ConsentRequired,
                "Consent to the session's restrictions is required",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryConsentRepository, InMemoryTalkSessionRepository, InMemoryUserRepository,
    };
    use crate::domain::foundation::{SystemClock, Timestamp};
    use crate::domain::talk_session::TalkSession;
    use crate::domain::user::User;

    struct Fixture {
        access: TalkSessionAccessControl,
        consent: Arc<ConsentService>,
        session_id: TalkSessionId,
        owner_id: UserId,
        users: Arc<InMemoryUserRepository>,
    }

    async fn fixture(restrictions: Vec<String>) -> Fixture {
        let talk_sessions: Arc<InMemoryTalkSessionRepository> =
            Arc::new(InMemoryTalkSessionRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let consents = Arc::new(InMemoryConsentRepository::new());
        let clock = Arc::new(SystemClock);

        let now = Timestamp::now();
        let owner_id = UserId::new();
        let mut session = TalkSession::new(
            TalkSessionId::new(),
            owner_id,
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
        session.update_restrictions(restrictions).unwrap();
        let session_id = session.id();
        talk_sessions.create(&session).await.unwrap();

        let consent = Arc::new(ConsentService::new(
            consents,
            talk_sessions.clone(),
            clock,
        ));
        let access = TalkSessionAccessControl::new(
            talk_sessions,
            users.clone(),
            consent.clone(),
        );
        Fixture {
            access,
            consent,
            session_id,
            owner_id,
            users,
        }
    }

    async fn registered_user(users: &InMemoryUserRepository) -> UserId {
        let user = User::new(UserId::new(), "carol".to_string(), true, Timestamp::now()).unwrap();
        let id = user.id();
        users.store(&user).await.unwrap();
        id
    }

    #[tokio::test]
    async fn owner_always_passes() {
        let f = fixture(vec!["auth.register".to_string()]).await;
        f.access.can_user_join(f.session_id, f.owner_id).await.unwrap();
    }

    #[tokio::test]
    async fn unrestricted_session_admits_unknown_users() {
        let f = fixture(vec![]).await;
        f.access
            .can_user_join(f.session_id, UserId::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_user_fails_restricted_session() {
        let f = fixture(vec!["auth.register".to_string()]).await;
        let err = f
            .access
            .can_user_join(f.session_id, UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn unmet_restrictions_name_every_missing_key() {
        let f = fixture(vec![
            "auth.register".to_string(),
            "demographics.city".to_string(),
            "demographics.gender".to_string(),
        ])
        .await;
        let user_id = registered_user(&f.users).await;

        let err = f.access.can_user_join(f.session_id, user_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestrictionNotSatisfied);
        assert!(err.message.contains("demographics.city"));
        assert!(err.message.contains("demographics.gender"));
        assert!(!err.message.contains("auth.register"));
    }

    #[tokio::test]
    async fn consent_is_required_after_restrictions_pass() {
        let f = fixture(vec!["auth.register".to_string()]).await;
        let user_id = registered_user(&f.users).await;

        let err = f.access.can_user_join(f.session_id, user_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConsentRequired);

        f.consent.take_consent(f.session_id, user_id).await.unwrap();
        f.access.can_user_join(f.session_id, user_id).await.unwrap();
    }
}
