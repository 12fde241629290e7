//! Vote entity and vote type.

mod errors;

pub use errors::VoteError;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, OpinionId, TalkSessionId, Timestamp, UserId, ValidationError, VoteId,
};

/// A user's stance on an opinion.
///
/// `Unvoted` exists as the zero value for storage rows that predate a
/// choice; it is never a valid stance to cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Unvoted,
    Agree,
    Disagree,
    Pass,
}

impl VoteType {
    /// Converts a stored integer code.
    ///
    /// Unknown codes coerce to `Unvoted` rather than failing; string
    /// parsing stays strict.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => VoteType::Agree,
            2 => VoteType::Disagree,
            3 => VoteType::Pass,
            _ => VoteType::Unvoted,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            VoteType::Unvoted => 0,
            VoteType::Agree => 1,
            VoteType::Disagree => 2,
            VoteType::Pass => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Unvoted => "unvoted",
            VoteType::Agree => "agree",
            VoteType::Disagree => "disagree",
            VoteType::Pass => "pass",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agree" => Ok(VoteType::Agree),
            "disagree" => Ok(VoteType::Disagree),
            "pass" => Ok(VoteType::Pass),
            other => Err(ValidationError::invalid_format(
                "vote_type",
                format!("unknown vote type '{}'", other),
            )),
        }
    }
}

/// One signed choice per (opinion, user) pair.
///
/// Immutable once cast in the base flow; `change_vote_type` exists for
/// administrative correction paths only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    id: VoteId,
    opinion_id: OpinionId,
    talk_session_id: TalkSessionId,
    user_id: UserId,
    vote_type: VoteType,
    created_at: Timestamp,
}

impl Vote {
    /// Creates a new vote.
    ///
    /// # Errors
    ///
    /// - `InvalidVoteType` when casting `Unvoted`
    pub fn new(
        id: VoteId,
        opinion_id: OpinionId,
        talk_session_id: TalkSessionId,
        user_id: UserId,
        vote_type: VoteType,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if vote_type == VoteType::Unvoted {
            return Err(DomainError::new(
                ErrorCode::InvalidVoteType,
                "cannot cast an unvoted vote",
            ));
        }
        Ok(Self {
            id,
            opinion_id,
            talk_session_id,
            user_id,
            vote_type,
            created_at,
        })
    }

    /// Reconstitutes a vote from storage without validation.
    pub fn reconstitute(
        id: VoteId,
        opinion_id: OpinionId,
        talk_session_id: TalkSessionId,
        user_id: UserId,
        vote_type: VoteType,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            opinion_id,
            talk_session_id,
            user_id,
            vote_type,
            created_at,
        }
    }

    pub fn id(&self) -> VoteId {
        self.id
    }

    pub fn opinion_id(&self) -> OpinionId {
        self.opinion_id
    }

    pub fn talk_session_id(&self) -> TalkSessionId {
        self.talk_session_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn vote_type(&self) -> VoteType {
        self.vote_type
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Administrative correction of the stance.
    ///
    /// # Errors
    ///
    /// - `InvalidVoteType` when correcting to `Unvoted`
    pub fn change_vote_type(&mut self, vote_type: VoteType) -> Result<(), DomainError> {
        if vote_type == VoteType::Unvoted {
            return Err(DomainError::new(
                ErrorCode::InvalidVoteType,
                "cannot change a vote to unvoted",
            ));
        }
        self.vote_type = vote_type;
        Ok(())
    }
}
