//! User aggregate and demographic value objects.

mod date_of_birth;
mod demographics;

pub use date_of_birth::DateOfBirth;
pub use demographics::{Demographics, Gender, HouseholdSize, Occupation};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// A platform user.
///
/// `registered` distinguishes fully registered accounts from guest or
/// provisional sessions; some talk sessions require a registered account
/// to participate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: String,
    icon_url: Option<String>,
    registered: bool,
    demographics: Demographics,
    created_at: Timestamp,
}

impl User {
    pub const DISPLAY_NAME_MAX: usize = 64;

    /// Creates a new user with validation.
    pub fn new(
        id: UserId,
        display_name: String,
        registered: bool,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("display_name"));
        }
        let len = trimmed.chars().count();
        if len > Self::DISPLAY_NAME_MAX {
            return Err(ValidationError::bad_length(
                "display_name",
                1,
                Self::DISPLAY_NAME_MAX,
                len,
            ));
        }

        Ok(Self {
            id,
            display_name: trimmed.to_string(),
            icon_url: None,
            registered,
            demographics: Demographics::default(),
            created_at,
        })
    }

    /// Reconstitutes a user from storage without validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        display_name: String,
        icon_url: Option<String>,
        registered: bool,
        demographics: Demographics,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name,
            icon_url,
            registered,
            demographics,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.icon_url.as_deref()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn set_icon_url(&mut self, url: Option<String>) {
        self.icon_url = url;
    }

    pub fn set_demographics(&mut self, demographics: Demographics) {
        self.demographics = demographics;
    }
}
