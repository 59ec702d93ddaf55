//! Angle wrapping and clamping in the units the engine actually uses.
//!
//! Catalog coordinates arrive in hours and degrees and the scene pipeline
//! keeps them that way, so the helpers here work in degrees and hours rather
//! than radians. Two conventions appear:
//!
//! - **Wrapping** preserves direction on the circle: 370° is the same
//!   direction as 10°. Azimuth, right ascension, and sidereal time wrap.
//! - **Clamping** enforces a physical limit: declination and latitude cannot
//!   pass the pole, so out-of-range values saturate at ±90°.
//!
//! Hour angle uses the signed range `(−180°, +180°]` so the discontinuity
//! sits at the anti-meridian, away from the observing position. The
//! tie-break at exactly ±180° is fixed to +180° so repeated normalization
//! is stable.
//!
//! `fmod` comes from `libm` because Rust's `%` is a remainder, not a
//! modulo, and the two differ for negative inputs.

use libm::fmod;

/// Wraps an angle in degrees to `[0, 360)`.
#[inline]
pub fn wrap_degrees(x: f64) -> f64 {
    let w = fmod(x, 360.0);
    if w < 0.0 {
        w + 360.0
    } else {
        w
    }
}

/// Wraps an angle in degrees to `(−180, +180]`.
///
/// Exactly −180 maps to +180, so the anti-meridian has one representation.
#[inline]
pub fn wrap_signed_degrees(x: f64) -> f64 {
    let w = fmod(x, 360.0);
    if w > 180.0 {
        w - 360.0
    } else if w <= -180.0 {
        w + 360.0
    } else {
        w
    }
}

/// Wraps a time-like quantity in hours to `[0, 24)`.
#[inline]
pub fn wrap_hours(x: f64) -> f64 {
    let w = fmod(x, 24.0);
    if w < 0.0 {
        w + 24.0
    } else {
        w
    }
}

/// Clamps a latitude-like angle in degrees to `[−90, +90]`.
#[inline]
pub fn clamp_latitude(x: f64) -> f64 {
    x.clamp(-90.0, 90.0)
}
