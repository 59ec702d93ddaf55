//! Low-precision solar position (Meeus-style mean elements plus the
//! equation of center). Accurate to ~0.01° over several centuries around
//! J2000, which is far tighter than the scene needs.

use crate::frames::EclipticCartesian;
use skysphere_core::angle::wrap_degrees;
use skysphere_core::constants::DEG_TO_RAD;
use skysphere_core::JulianDate;

/// Geometric solar position for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent ecliptic longitude of date, degrees `[0, 360)`.
    pub ecliptic_longitude_deg: f64,
    /// Earth–Sun distance, AU.
    pub distance_au: f64,
}

/// Computes the Sun's apparent ecliptic longitude and distance.
pub fn solar_position(jd: JulianDate) -> SolarPosition {
    let t = jd.julian_centuries();

    // Mean longitude and mean anomaly, degrees.
    let l0 = wrap_degrees(280.46646 + 36000.76983 * t + 0.0003032 * t * t);
    let m = wrap_degrees(357.52911 + 35999.05029 * t - 0.0001537 * t * t);
    let m_rad = m * DEG_TO_RAD;

    // Equation of center.
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * libm::sin(m_rad)
        + (0.019993 - 0.000101 * t) * libm::sin(2.0 * m_rad)
        + 0.000289 * libm::sin(3.0 * m_rad);

    let true_longitude = wrap_degrees(l0 + c);

    let e = 0.016708634 - 0.000042037 * t;
    let true_anomaly_rad = (m + c) * DEG_TO_RAD;
    let distance_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * libm::cos(true_anomaly_rad));

    SolarPosition {
        ecliptic_longitude_deg: true_longitude,
        distance_au,
    }
}

/// Geocentric ecliptic position of the Sun, AU. Solar ecliptic latitude is
/// below 1.2″ and treated as zero.
pub fn geocentric_position(jd: JulianDate) -> EclipticCartesian {
    let sun = solar_position(jd);
    EclipticCartesian::from_spherical(
        sun.ecliptic_longitude_deg * DEG_TO_RAD,
        0.0,
        sun.distance_au,
    )
}

/// Apparent visual magnitude of the Sun.
pub const SUN_MAGNITUDE: f64 = -26.74;
