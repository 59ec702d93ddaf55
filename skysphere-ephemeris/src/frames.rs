//! Ecliptic Cartesian positions and the rotation into the equatorial frame.

use skysphere_core::angle::wrap_hours;
use skysphere_core::constants::{DEG_TO_RAD, OBLIQUITY_J2000_DEG, RAD_TO_DEG};
use skysphere_core::Equatorial;

/// Heliocentric or geocentric position in the ecliptic frame, AU.
///
/// `x` toward the vernal equinox, `z` toward the north ecliptic pole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EclipticCartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EclipticCartesian {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds from spherical ecliptic coordinates (radians, AU).
    pub fn from_spherical(lon_rad: f64, lat_rad: f64, r: f64) -> Self {
        let (sin_lon, cos_lon) = libm::sincos(lon_rad);
        let (sin_lat, cos_lat) = libm::sincos(lat_rad);
        Self::new(
            r * cos_lat * cos_lon,
            r * cos_lat * sin_lon,
            r * sin_lat,
        )
    }

    pub fn length(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    pub fn sub(&self, other: &EclipticCartesian) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn add(&self, other: &EclipticCartesian) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Ecliptic longitude in degrees `[0, 360)`.
    pub fn longitude_deg(&self) -> f64 {
        skysphere_core::angle::wrap_degrees(libm::atan2(self.y, self.x) * RAD_TO_DEG)
    }
}

/// Mean obliquity of the ecliptic in degrees for the given Julian centuries
/// since J2000 (IAU 1980 linear-ish truncation).
pub fn obliquity_deg(t_centuries: f64) -> f64 {
    OBLIQUITY_J2000_DEG - 0.0130042 * t_centuries - 1.64e-7 * t_centuries * t_centuries
}

/// Rotates a geocentric ecliptic vector into equatorial `(ra, dec)` plus
/// distance, using the obliquity for the same epoch.
pub fn ecliptic_to_equatorial(v: &EclipticCartesian, t_centuries: f64) -> (Equatorial, f64) {
    let eps = obliquity_deg(t_centuries) * DEG_TO_RAD;
    let (sin_eps, cos_eps) = libm::sincos(eps);

    let xe = v.x;
    let ye = v.y * cos_eps - v.z * sin_eps;
    let ze = v.y * sin_eps + v.z * cos_eps;

    let r = libm::sqrt(xe * xe + ye * ye + ze * ze);
    if r < 1e-12 {
        return (Equatorial::new(0.0, 0.0), 0.0);
    }

    let ra_hours = wrap_hours(libm::atan2(ye, xe) * RAD_TO_DEG / 15.0);
    let dec_deg = libm::asin((ze / r).clamp(-1.0, 1.0)) * RAD_TO_DEG;
    (Equatorial::new(ra_hours, dec_deg), r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vernal_equinox_direction_maps_to_ra_zero() {
        let v = EclipticCartesian::new(1.0, 0.0, 0.0);
        let (eq, r) = ecliptic_to_equatorial(&v, 0.0);
        assert!(eq.ra_hours < 1e-9 || eq.ra_hours > 24.0 - 1e-9);
        assert!(eq.dec_deg.abs() < 1e-9);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn north_ecliptic_pole_tilts_by_obliquity() {
        let v = EclipticCartesian::new(0.0, 0.0, 1.0);
        let (eq, _) = ecliptic_to_equatorial(&v, 0.0);
        assert!((eq.dec_deg - (90.0 - OBLIQUITY_J2000_DEG)).abs() < 1e-6);
    }

    #[test]
    fn summer_solstice_direction() {
        // Ecliptic longitude 90° maps to RA 6h, Dec +obliquity.
        let v = EclipticCartesian::from_spherical(90.0 * DEG_TO_RAD, 0.0, 1.0);
        let (eq, _) = ecliptic_to_equatorial(&v, 0.0);
        assert!((eq.ra_hours - 6.0).abs() < 1e-9);
        assert!((eq.dec_deg - OBLIQUITY_J2000_DEG).abs() < 1e-6);
    }

    #[test]
    fn spherical_round_trip_longitude() {
        for lon in [0.0, 45.0, 123.4, 250.0, 359.0] {
            let v = EclipticCartesian::from_spherical(lon * DEG_TO_RAD, 0.1, 2.5);
            assert!((v.longitude_deg() - lon).abs() < 1e-9, "lon {}", lon);
        }
    }
}
