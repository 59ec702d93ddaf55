//! Coordinate transforms between the equatorial, horizontal, and scene
//! Cartesian frames.
//!
//! The chain every catalog entry travels per instant:
//!
//! ```text
//! (ra, dec)  --lst,lat-->  (alt, az)  --R-->  (x, y, z)
//! ```
//!
//! The altitude/azimuth formulas use the atan2 form throughout, which stays
//! finite at the celestial poles and for observers at ±90° latitude — there
//! is no division by `cos(lat)` anywhere in this module.

use crate::angle::{wrap_degrees, wrap_hours, wrap_signed_degrees};
use crate::constants::{DEG_TO_RAD, DEGREES_PER_HOUR, RAD_TO_DEG};
use crate::vector::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Equatorial coordinates: right ascension in hours `[0, 24)`, declination
/// in degrees `[−90, +90]`. Catalog values are J2000 and consumed as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equatorial {
    pub ra_hours: f64,
    pub dec_deg: f64,
}

impl Equatorial {
    pub fn new(ra_hours: f64, dec_deg: f64) -> Self {
        Self {
            ra_hours: wrap_hours(ra_hours),
            dec_deg: dec_deg.clamp(-90.0, 90.0),
        }
    }
}

/// Horizontal coordinates: altitude `[−90, +90]`, azimuth `[0, 360)`
/// measured from true north, clockwise through east.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Horizontal {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
}

impl Horizontal {
    pub fn new(altitude_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            altitude_deg: altitude_deg.clamp(-90.0, 90.0),
            azimuth_deg: wrap_degrees(azimuth_deg),
        }
    }

    /// True when the point is above the mathematical horizon.
    #[inline]
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg > 0.0
    }
}

/// Hour angle of a target in degrees, normalized to `(−180, +180]`.
///
/// Negative values are east of the meridian (not yet culminated).
#[inline]
pub fn hour_angle_deg(lst_hours: f64, ra_hours: f64) -> f64 {
    wrap_signed_degrees((lst_hours - ra_hours) * DEGREES_PER_HOUR)
}

/// Transforms equatorial coordinates to the observer's horizontal frame.
pub fn equatorial_to_horizontal(eq: &Equatorial, latitude_deg: f64, lst_hours: f64) -> Horizontal {
    let h = hour_angle_deg(lst_hours, eq.ra_hours) * DEG_TO_RAD;
    let dec = eq.dec_deg * DEG_TO_RAD;
    let lat = latitude_deg * DEG_TO_RAD;

    let (sin_h, cos_h) = libm::sincos(h);
    let (sin_dec, cos_dec) = libm::sincos(dec);
    let (sin_lat, cos_lat) = libm::sincos(lat);

    let sin_alt = (sin_dec * sin_lat + cos_dec * cos_lat * cos_h).clamp(-1.0, 1.0);
    let alt = libm::asin(sin_alt);

    let az = libm::atan2(-cos_dec * sin_h, sin_dec * cos_lat - cos_dec * sin_lat * cos_h);

    Horizontal::new(alt * RAD_TO_DEG, wrap_degrees(az * RAD_TO_DEG))
}

/// Inverse of [`equatorial_to_horizontal`] for the same latitude and LST.
pub fn horizontal_to_equatorial(hz: &Horizontal, latitude_deg: f64, lst_hours: f64) -> Equatorial {
    let alt = hz.altitude_deg * DEG_TO_RAD;
    let az = hz.azimuth_deg * DEG_TO_RAD;
    let lat = latitude_deg * DEG_TO_RAD;

    let (sin_alt, cos_alt) = libm::sincos(alt);
    let (sin_az, cos_az) = libm::sincos(az);
    let (sin_lat, cos_lat) = libm::sincos(lat);

    let sin_dec = (sin_alt * sin_lat + cos_alt * cos_lat * cos_az).clamp(-1.0, 1.0);
    let dec = libm::asin(sin_dec);

    let h = libm::atan2(-sin_az * cos_alt, sin_alt * cos_lat - cos_alt * sin_lat * cos_az);

    let ra = lst_hours - h * RAD_TO_DEG / DEGREES_PER_HOUR;
    Equatorial::new(wrap_hours(ra), dec * RAD_TO_DEG)
}

/// Projects horizontal coordinates onto the scene sphere of radius `r`.
///
/// `+y` is the zenith, `+x` east, `+z` toward azimuth 180° (south).
pub fn horizontal_to_cartesian(hz: &Horizontal, r: f64) -> Vector3 {
    let alt = hz.altitude_deg * DEG_TO_RAD;
    let az = hz.azimuth_deg * DEG_TO_RAD;

    let (sin_alt, cos_alt) = libm::sincos(alt);
    let (sin_az, cos_az) = libm::sincos(az);

    Vector3::new(r * cos_alt * sin_az, r * sin_alt, -r * cos_alt * cos_az)
}

/// Recovers horizontal coordinates from a scene-sphere position.
pub fn cartesian_to_horizontal(v: &Vector3) -> Horizontal {
    let r = v.length();
    if r < 1e-12 {
        return Horizontal::new(-90.0, 0.0);
    }
    let alt = libm::asin((v.y / r).clamp(-1.0, 1.0));
    let az = libm::atan2(v.x, -v.z);
    Horizontal::new(alt * RAD_TO_DEG, wrap_degrees(az * RAD_TO_DEG))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCENE_RADIUS;

    #[test]
    fn polaris_from_mid_latitude() {
        // α UMi from lat +45: altitude ≈ latitude, azimuth near north.
        let polaris = Equatorial::new(2.530667, 89.264);
        for lst in [0.0, 6.0, 12.0, 18.0] {
            let hz = equatorial_to_horizontal(&polaris, 45.0, lst);
            assert!(
                (hz.altitude_deg - 45.0).abs() < 1.0,
                "lst {}: altitude {} should be ~45",
                lst,
                hz.altitude_deg
            );
            let az_from_north = wrap_signed_degrees(hz.azimuth_deg).abs();
            assert!(
                az_from_north < 2.0,
                "lst {}: azimuth {} should be near north",
                lst,
                hz.azimuth_deg
            );
        }
    }

    #[test]
    fn object_on_meridian_is_due_south() {
        // Dec 0 observed from lat +45 at H = 0 culminates at alt 45, az 180.
        let eq = Equatorial::new(6.0, 0.0);
        let hz = equatorial_to_horizontal(&eq, 45.0, 6.0);
        assert!((hz.altitude_deg - 45.0).abs() < 1e-9);
        assert!((hz.azimuth_deg - 180.0).abs() < 1e-9);
    }

    #[test]
    fn pole_observer_is_singularity_free() {
        // At the north pole every altitude equals the declination and the
        // outputs stay finite for all hour angles.
        for ra in [0.0, 3.7, 12.0, 18.25] {
            let hz = equatorial_to_horizontal(&Equatorial::new(ra, 30.0), 90.0, 5.0);
            assert!((hz.altitude_deg - 30.0).abs() < 1e-9);
            assert!(hz.azimuth_deg.is_finite());

            let hz_south = equatorial_to_horizontal(&Equatorial::new(ra, 30.0), -90.0, 5.0);
            assert!((hz_south.altitude_deg + 30.0).abs() < 1e-9);
            assert!(hz_south.azimuth_deg.is_finite());
        }
    }

    #[test]
    fn equatorial_round_trip() {
        let lat = 37.77;
        let lst = 14.3;
        for (ra, dec) in [(0.0, 0.0), (5.5, 45.0), (12.0, -60.0), (23.9, 10.0)] {
            let eq = Equatorial::new(ra, dec);
            let hz = equatorial_to_horizontal(&eq, lat, lst);
            let back = horizontal_to_equatorial(&hz, lat, lst);
            let ra_err = wrap_signed_degrees((back.ra_hours - eq.ra_hours) * 15.0).abs();
            assert!(
                ra_err < 1e-9,
                "ra {} -> {} (err {} deg)",
                eq.ra_hours,
                back.ra_hours,
                ra_err
            );
            assert!((back.dec_deg - eq.dec_deg).abs() < 1e-9);
        }
    }

    #[test]
    fn cartesian_axes_match_convention() {
        // Zenith.
        let up = horizontal_to_cartesian(&Horizontal::new(90.0, 0.0), SCENE_RADIUS);
        assert!((up.y - SCENE_RADIUS).abs() < 1e-9);
        assert!(up.x.abs() < 1e-9 && up.z.abs() < 1e-9);

        // North horizon sits at z = -R, opposite the south +z axis.
        let north = horizontal_to_cartesian(&Horizontal::new(0.0, 0.0), SCENE_RADIUS);
        assert!((north.z + SCENE_RADIUS).abs() < 1e-9);

        // East horizon is +x.
        let east = horizontal_to_cartesian(&Horizontal::new(0.0, 90.0), SCENE_RADIUS);
        assert!((east.x - SCENE_RADIUS).abs() < 1e-9);

        // South horizon is +z.
        let south = horizontal_to_cartesian(&Horizontal::new(0.0, 180.0), SCENE_RADIUS);
        assert!((south.z - SCENE_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn cartesian_round_trip() {
        for alt in [-89.0, -45.0, 0.0, 30.0, 89.0] {
            for az in [0.0, 90.0, 179.5, 270.0, 359.0] {
                let hz = Horizontal::new(alt, az);
                let v = horizontal_to_cartesian(&hz, SCENE_RADIUS);
                assert!((v.length() - SCENE_RADIUS).abs() < 1e-9);
                let back = cartesian_to_horizontal(&v);
                assert!(
                    (back.altitude_deg - alt).abs() < 1e-9,
                    "alt {} -> {}",
                    alt,
                    back.altitude_deg
                );
                let az_err = wrap_signed_degrees(back.azimuth_deg - az).abs();
                assert!(az_err < 1e-9, "az {} -> {}", az, back.azimuth_deg);
            }
        }
    }

    #[test]
    fn hour_angle_tie_break() {
        // lst - ra = 12h is exactly 180°; the signed wrap must return +180.
        assert_eq!(hour_angle_deg(18.0, 6.0), 180.0);
        assert_eq!(hour_angle_deg(6.0, 18.0), 180.0);
    }

    #[test]
    fn outputs_always_in_range() {
        for lat in [-90.0, -45.0, 0.0, 45.0, 90.0] {
            for lst in [0.0, 7.3, 15.9, 23.99] {
                for ra in [0.0, 8.0, 16.0] {
                    for dec in [-90.0, -30.0, 0.0, 30.0, 90.0] {
                        let hz =
                            equatorial_to_horizontal(&Equatorial::new(ra, dec), lat, lst);
                        assert!((0.0..360.0).contains(&hz.azimuth_deg));
                        assert!((-90.0..=90.0).contains(&hz.altitude_deg));
                    }
                }
            }
        }
    }
}
