//! Participation restriction registry.
//!
//! Talk session owners can restrict who may participate by naming
//! attribute keys from a closed registry. Each attribute knows how to
//! check whether a given user satisfies it.

use once_cell::sync::Lazy;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;

/// A single restriction attribute from the registry.
pub struct RestrictionAttribute {
    /// Stable key, e.g. `demographics.city`.
    pub key: &'static str,
    /// Human-readable description shown to users before consenting.
    pub description: &'static str,
    /// Display ordering in consent prompts.
    pub order: u8,
    /// Keys this attribute implies (satisfying this requires them too).
    pub depends_on: &'static [&'static str],
    /// Whether the user satisfies this restriction.
    pub satisfied: fn(&User) -> bool,
}

/// The closed registry of valid restriction keys.
pub static RESTRICTION_REGISTRY: Lazy<Vec<RestrictionAttribute>> = Lazy::new(|| {
    vec![
        RestrictionAttribute {
            key: "auth.register",
            description: "登録ユーザーであること",
            order: 0,
            depends_on: &[],
            satisfied: |user| user.is_registered(),
        },
        RestrictionAttribute {
            key: "demographics.birth",
            description: "生年月日を登録していること",
            order: 1,
            depends_on: &["auth.register"],
            satisfied: |user| user.demographics().date_of_birth().is_some(),
        },
        RestrictionAttribute {
            key: "demographics.gender",
            description: "性別を登録していること",
            order: 2,
            depends_on: &["auth.register"],
            satisfied: |user| user.demographics().gender().is_some(),
        },
        RestrictionAttribute {
            key: "demographics.city",
            description: "市区町村を登録していること",
            order: 3,
            depends_on: &["auth.register"],
            satisfied: |user| user.demographics().city().is_some(),
        },
        RestrictionAttribute {
            key: "demographics.prefecture",
            description: "都道府県を登録していること",
            order: 4,
            depends_on: &["auth.register"],
            satisfied: |user| user.demographics().prefecture().is_some(),
        },
        RestrictionAttribute {
            key: "demographics.household_size",
            description: "世帯人数を登録していること",
            order: 5,
            depends_on: &["auth.register"],
            satisfied: |user| user.demographics().household_size().is_some(),
        },
        RestrictionAttribute {
            key: "demographics.occupation",
            description: "職業を登録していること",
            order: 6,
            depends_on: &["auth.register"],
            satisfied: |user| user.demographics().occupation().is_some(),
        },
    ]
});

/// Looks up a restriction attribute by key.
pub fn find_restriction(key: &str) -> Option<&'static RestrictionAttribute> {
    RESTRICTION_REGISTRY.iter().find(|attr| attr.key == key)
}

/// Validates a list of restriction keys against the registry.
///
/// Collects every invalid key into a single aggregated error so the
/// caller sees the full diagnostic, not just the first bad key.
pub fn validate_restriction_keys(keys: &[String]) -> Result<(), DomainError> {
    let invalid: Vec<&str> = keys
        .iter()
        .filter(|key| find_restriction(key).is_none())
        .map(|key| key.as_str())
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    Err(DomainError::new(
        ErrorCode::InvalidRestrictionAttribute,
        format!("invalid restriction attributes: {}", invalid.join(", ")),
    )
    .with_detail("invalid_keys", invalid.join(",")))
}

/// Returns the restriction keys the given user does NOT satisfy.
pub fn unmet_restrictions<'a>(keys: &'a [String], user: &User) -> Vec<&'a str> {
    keys.iter()
        .filter_map(|key| {
            let attr = find_restriction(key)?;
            if (attr.satisfied)(user) {
                None
            } else {
                Some(key.as_str())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::user::{DateOfBirth, Demographics, Gender};

    fn user(registered: bool) -> User {
        User::new(UserId::new(), "bob".to_string(), registered, Timestamp::now()).unwrap()
    }

    #[test]
    fn registry_holds_all_seven_keys() {
        let keys: Vec<&str> = RESTRICTION_REGISTRY.iter().map(|a| a.key).collect();
        for expected in [
            "auth.register",
            "demographics.birth",
            "demographics.gender",
            "demographics.city",
            "demographics.prefecture",
            "demographics.household_size",
            "demographics.occupation",
        ] {
            assert!(keys.contains(&expected), "missing key {}", expected);
        }
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn validate_collects_every_invalid_key() {
        let keys = vec![
            "demographics.gender".to_string(),
            "bogus.key".to_string(),
            "another.bogus".to_string(),
        ];
        let err = validate_restriction_keys(&keys).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRestrictionAttribute);
        assert!(err.message.contains("bogus.key"));
        assert!(err.message.contains("another.bogus"));
        assert!(!err.message.contains("demographics.gender"));
    }

    #[test]
    fn validate_accepts_all_valid_keys() {
        let keys = vec!["auth.register".to_string(), "demographics.city".to_string()];
        assert!(validate_restriction_keys(&keys).is_ok());
    }

    #[test]
    fn unmet_restrictions_reports_unsatisfied_keys() {
        let mut user = user(true);
        user.set_demographics(Demographics::new(
            None,
            None,
            Some(Gender::Other),
            None,
            None,
            Some(DateOfBirth::new(19900616).unwrap()),
        ));

        let keys = vec![
            "auth.register".to_string(),
            "demographics.gender".to_string(),
            "demographics.city".to_string(),
        ];
        let unmet = unmet_restrictions(&keys, &user);
        assert_eq!(unmet, vec!["demographics.city"]);
    }

    #[test]
    fn unregistered_user_fails_auth_register() {
        let user = user(false);
        let keys = vec!["auth.register".to_string()];
        assert_eq!(unmet_restrictions(&keys, &user), vec!["auth.register"]);
    }
}
