//! Date of birth stored as a compact `YYYYMMDD` integer.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// A date of birth in `YYYYMMDD` integer form (e.g. `19900616`).
///
/// The compact form survives round-trips through demographic CSV imports
/// and the storage layer without timezone drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateOfBirth(i32);

impl DateOfBirth {
    /// Creates a date of birth from a `YYYYMMDD` integer, validating that
    /// it names a real calendar date.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        Self::to_naive_date(value).ok_or_else(|| {
            ValidationError::invalid_format(
                "date_of_birth",
                format!("{} is not a valid YYYYMMDD date", value),
            )
        })?;
        Ok(Self(value))
    }

    /// Returns the raw `YYYYMMDD` integer.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns the age in whole years at `now`, counting the birthday
    /// itself as already turned.
    pub fn age(&self, now: Timestamp) -> i32 {
        // new() guarantees a valid date
        let birth = Self::to_naive_date(self.0).unwrap_or(NaiveDate::MIN);
        let today = now.as_datetime().date_naive();

        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        age
    }

    fn to_naive_date(value: i32) -> Option<NaiveDate> {
        let year = value / 10_000;
        let month = (value / 100 % 100) as u32;
        let day = (value % 100) as u32;
        if year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_date() {
        let dob = DateOfBirth::new(19900616).unwrap();
        assert_eq!(dob.value(), 19900616);
    }

    #[test]
    fn new_rejects_impossible_dates() {
        assert!(DateOfBirth::new(19901332).is_err());
        assert!(DateOfBirth::new(19900230).is_err());
        assert!(DateOfBirth::new(0).is_err());
        assert!(DateOfBirth::new(-19900616).is_err());
    }

    #[test]
    fn new_accepts_leap_day() {
        assert!(DateOfBirth::new(20000229).is_ok());
        assert!(DateOfBirth::new(19000229).is_err());
    }

    #[test]
    fn age_rolls_over_on_birthday() {
        let dob = DateOfBirth::new(19900616).unwrap();

        let day_before = Timestamp::from_ymd_hms(2023, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(dob.age(day_before), 32);

        let birthday = Timestamp::from_ymd_hms(2023, 6, 16, 0, 0, 0).unwrap();
        assert_eq!(dob.age(birthday), 33);
    }
}
