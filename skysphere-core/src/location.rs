//! The observer's geographic position.

use crate::errors::{AstroError, AstroResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A validated geographic position on the WGS-84 ellipsoid.
///
/// Latitude is geodetic, degrees north; longitude is degrees east of the
/// prime meridian. Construction rejects out-of-range values so downstream
/// math never has to re-check. The value is immutable for the life of a
/// scene.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoLocation {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl GeoLocation {
    /// Creates a location from degrees, validating both ranges.
    ///
    /// # Errors
    /// Returns [`AstroError::InvalidLocation`] when latitude is outside
    /// `[−90, +90]`, longitude is outside `[−180, +180]`, or either value is
    /// not finite.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> AstroResult<Self> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(AstroError::invalid_location(
                latitude_deg,
                longitude_deg,
                "coordinates must be finite",
            ));
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(AstroError::invalid_location(
                latitude_deg,
                longitude_deg,
                "latitude outside [-90, +90]",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(AstroError::invalid_location(
                latitude_deg,
                longitude_deg,
                "longitude outside [-180, +180]",
            ));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }
}

impl std::fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude_deg >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude_deg >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.latitude_deg.abs(),
            ns,
            self.longitude_deg.abs(),
            ew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let loc = GeoLocation::new(37.77, -122.42).unwrap();
        assert_eq!(loc.latitude_deg(), 37.77);
        assert_eq!(loc.longitude_deg(), -122.42);
    }

    #[test]
    fn accepts_poles_and_date_line() {
        assert!(GeoLocation::new(90.0, 0.0).is_ok());
        assert!(GeoLocation::new(-90.0, 180.0).is_ok());
        assert!(GeoLocation::new(0.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoLocation::new(90.1, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 180.5).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn display_uses_hemisphere_letters() {
        let loc = GeoLocation::new(-33.8688, 151.2093).unwrap();
        let s = format!("{}", loc);
        assert!(s.contains('S') && s.contains('E'), "got {}", s);
    }
}
