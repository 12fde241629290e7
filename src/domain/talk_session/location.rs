//! Geographic location attached to a talk session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A latitude/longitude pair for sessions tied to a physical place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location, validating coordinate ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::invalid_format(
                "latitude",
                format!("{} is outside -90..=90", latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::invalid_format(
                "longitude",
                format!("{} is outside -180..=180", longitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates_are_accepted() {
        let loc = Location::new(35.6812, 139.7671).unwrap();
        assert_eq!(loc.latitude(), 35.6812);
        assert_eq!(loc.longitude(), 139.7671);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -180.5).is_err());
    }
}
