//! Truncated lunar theory: the principal periodic terms of the ELP series.
//!
//! Keeps the terms above ~0.1° in longitude and the four largest distance
//! terms. Worst-case error is ~0.3° in ecliptic longitude — enough for the
//! Moon's marker, its phase, and rise/set behavior, not for occultation
//! work. Topocentric parallax (up to 1°) is not applied; the
//! engine treats the Moon like every other body on the celestial sphere.

use crate::frames::EclipticCartesian;
use crate::sun;
use skysphere_core::angle::wrap_degrees;
use skysphere_core::constants::{AU_KM, DEG_TO_RAD};
use skysphere_core::JulianDate;

/// Geocentric lunar position for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude of date, degrees `[0, 360)`.
    pub ecliptic_longitude_deg: f64,
    /// Ecliptic latitude, degrees.
    pub ecliptic_latitude_deg: f64,
    /// Earth–Moon distance, km.
    pub distance_km: f64,
}

/// Computes the Moon's geocentric ecliptic position.
pub fn lunar_position(jd: JulianDate) -> LunarPosition {
    let t = jd.julian_centuries();

    // Mean elements, degrees (Meeus ch. 47 truncations).
    let l_prime = wrap_degrees(218.3164477 + 481267.88123421 * t);
    let d = wrap_degrees(297.8501921 + 445267.1114034 * t);
    let m = wrap_degrees(357.5291092 + 35999.0502909 * t);
    let m_prime = wrap_degrees(134.9633964 + 477198.8675055 * t);
    let f = wrap_degrees(93.2720950 + 483202.0175233 * t);

    let d_rad = d * DEG_TO_RAD;
    let m_rad = m * DEG_TO_RAD;
    let mp_rad = m_prime * DEG_TO_RAD;
    let f_rad = f * DEG_TO_RAD;

    // Principal longitude terms, degrees.
    let longitude = l_prime
        + 6.288774 * libm::sin(mp_rad)
        + 1.274027 * libm::sin(2.0 * d_rad - mp_rad)
        + 0.658314 * libm::sin(2.0 * d_rad)
        + 0.213618 * libm::sin(2.0 * mp_rad)
        - 0.185116 * libm::sin(m_rad)
        - 0.114332 * libm::sin(2.0 * f_rad)
        + 0.058793 * libm::sin(2.0 * d_rad - 2.0 * mp_rad)
        + 0.057066 * libm::sin(2.0 * d_rad - m_rad - mp_rad)
        + 0.053322 * libm::sin(2.0 * d_rad + mp_rad)
        + 0.045758 * libm::sin(2.0 * d_rad - m_rad);

    // Principal latitude terms, degrees.
    let latitude = 5.128122 * libm::sin(f_rad)
        + 0.280602 * libm::sin(mp_rad + f_rad)
        + 0.277693 * libm::sin(mp_rad - f_rad)
        + 0.173237 * libm::sin(2.0 * d_rad - f_rad);

    // Distance, km.
    let distance = 385000.56
        - 20905.355 * libm::cos(mp_rad)
        - 3699.111 * libm::cos(2.0 * d_rad - mp_rad)
        - 2955.968 * libm::cos(2.0 * d_rad)
        - 569.925 * libm::cos(2.0 * mp_rad);

    LunarPosition {
        ecliptic_longitude_deg: wrap_degrees(longitude),
        ecliptic_latitude_deg: latitude,
        distance_km: distance,
    }
}

/// Geocentric ecliptic position of the Moon, AU.
pub fn geocentric_position(jd: JulianDate) -> EclipticCartesian {
    let moon = lunar_position(jd);
    EclipticCartesian::from_spherical(
        moon.ecliptic_longitude_deg * DEG_TO_RAD,
        moon.ecliptic_latitude_deg * DEG_TO_RAD,
        moon.distance_km / AU_KM,
    )
}

/// Lunar phase angle in degrees `[0, 360)`.
///
/// The elongation of the Moon from the Sun in ecliptic longitude:
/// 0 = new, 90 = first quarter, 180 = full, 270 = last quarter.
pub fn phase_angle_deg(jd: JulianDate) -> f64 {
    let moon = lunar_position(jd);
    let sun = sun::solar_position(jd);
    wrap_degrees(moon.ecliptic_longitude_deg - sun.ecliptic_longitude_deg)
}

/// Illuminated fraction of the lunar disc, `[0, 1]`.
pub fn illuminated_fraction(phase_deg: f64) -> f64 {
    (1.0 - libm::cos(phase_deg * DEG_TO_RAD)) / 2.0
}

/// Apparent visual magnitude from the phase angle.
///
/// Uses the standard empirical fit on the Sun–Moon–Earth angle
/// `α = 180° − elongation`: −12.7 at full, fading steeply toward new.
pub fn magnitude(phase_deg: f64) -> f64 {
    let alpha = libm::fabs(180.0 - phase_deg.clamp(0.0, 360.0));
    -12.73 + 0.026 * alpha + 4.0e-9 * alpha.powi(4)
}
