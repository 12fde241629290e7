//! TalkSession module - discussion topics, restrictions, and consent.

mod aggregate;
mod consent;
mod errors;
mod location;
mod restriction;

pub use aggregate::{TalkSession, MAX_DESCRIPTION_LENGTH, MAX_THEME_LENGTH};
pub use consent::TalkSessionConsent;
pub use errors::TalkSessionError;
pub use location::Location;
pub use restriction::{
    find_restriction, unmet_restrictions, validate_restriction_keys, RestrictionAttribute,
    RESTRICTION_REGISTRY,
};
