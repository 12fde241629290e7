//! Demographic attributes used by talk session restrictions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DateOfBirth;

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer_not_to_say",
        };
        write!(f, "{}", s)
    }
}

/// Number of people in the household, capped at 6+.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseholdSize(u8);

impl HouseholdSize {
    pub fn new(size: u8) -> Self {
        Self(size.min(6))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Occupation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    FullTimeEmployee,
    ContractEmployee,
    PublicServant,
    SelfEmployed,
    Executive,
    PartTime,
    HomeMaker,
    Student,
    Unemployed,
    Other,
}

/// Optional demographic attributes attached to a user.
///
/// Every field is optional; restriction checks treat an unset field as
/// not satisfying the corresponding restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    city: Option<String>,
    prefecture: Option<String>,
    gender: Option<Gender>,
    household_size: Option<HouseholdSize>,
    occupation: Option<Occupation>,
    date_of_birth: Option<DateOfBirth>,
}

impl Demographics {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        city: Option<String>,
        prefecture: Option<String>,
        gender: Option<Gender>,
        household_size: Option<HouseholdSize>,
        occupation: Option<Occupation>,
        date_of_birth: Option<DateOfBirth>,
    ) -> Self {
        Self {
            city: city.filter(|c| !c.trim().is_empty()),
            prefecture: prefecture.filter(|p| !p.trim().is_empty()),
            gender,
            household_size,
            occupation,
            date_of_birth,
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn prefecture(&self) -> Option<&str> {
        self.prefecture.as_deref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn household_size(&self) -> Option<HouseholdSize> {
        self.household_size
    }

    pub fn occupation(&self) -> Option<Occupation> {
        self.occupation
    }

    pub fn date_of_birth(&self) -> Option<DateOfBirth> {
        self.date_of_birth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_city_is_treated_as_unset() {
        let demographics = Demographics::new(
            Some("  ".to_string()),
            Some("Tokyo".to_string()),
            None,
            None,
            None,
            None,
        );
        assert!(demographics.city().is_none());
        assert_eq!(demographics.prefecture(), Some("Tokyo"));
    }

    #[test]
    fn household_size_caps_at_six() {
        assert_eq!(HouseholdSize::new(9).value(), 6);
        assert_eq!(HouseholdSize::new(3).value(), 3);
    }
}
