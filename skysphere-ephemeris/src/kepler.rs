//! Two-body Kepler propagation for minor planets.
//!
//! Solves `M = E − e·sin E` and rotates the perifocal position into
//! heliocentric ecliptic coordinates. The solver is shared with the
//! planetary theory in [`crate::planets`].
//!
//! Positions are heliocentric: the engine draws the main belt around the
//! observer as if the observer sat at the Sun, which is visually adequate
//! for a planetarium overview. Callers needing geocentric vectors subtract
//! the Earth's heliocentric position from [`crate::planets`].

use crate::frames::EclipticCartesian;
use skysphere_core::angle::wrap_degrees;
use skysphere_core::constants::DEG_TO_RAD;
use skysphere_core::{JulianDate, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convergence tolerance for the eccentric anomaly, radians.
const KEPLER_TOLERANCE: f64 = 1e-8;
/// Iteration cap; reaching it flags the solution as unconverged.
const KEPLER_MAX_ITERATIONS: u32 = 10;
/// Below this eccentricity plain fixed-point iteration converges fast
/// enough; above it Newton's method is used.
const FIXED_POINT_ECCENTRICITY_LIMIT: f64 = 0.2;

/// Classical Keplerian elements for a Sun-orbiting minor body.
///
/// Angles in degrees, semi-major axis in AU, mean motion in degrees/day.
/// Eccentricity must be below 1 (closed orbits only).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub arg_perihelion_deg: f64,
    pub mean_anomaly_deg: f64,
    pub epoch_jd: f64,
    pub mean_motion_deg_day: f64,
}

/// Result of a Kepler solve: the eccentric anomaly and whether the
/// iteration hit the tolerance before the cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly_rad: f64,
    pub converged: bool,
    pub iterations: u32,
}

/// Solves Kepler's equation for the eccentric anomaly.
///
/// `mean_anomaly_rad` may be any value; it is reduced internally. For
/// `e < 0.2` the fixed-point form `E ← M + e·sin E` is used, otherwise
/// Newton's method. Non-convergence returns the last iterate with
/// `converged = false` — callers keep the value and mark the body.
pub fn solve_kepler(mean_anomaly_rad: f64, eccentricity: f64) -> KeplerSolution {
    let m = mean_anomaly_rad;
    let e = eccentricity;
    let mut ea = m;
    let mut iterations = 0;

    while iterations < KEPLER_MAX_ITERATIONS {
        let next = if e < FIXED_POINT_ECCENTRICITY_LIMIT {
            m + e * libm::sin(ea)
        } else {
            ea - (ea - e * libm::sin(ea) - m) / (1.0 - e * libm::cos(ea))
        };
        let delta = next - ea;
        ea = next;
        iterations += 1;
        if libm::fabs(delta) < KEPLER_TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly_rad: ea,
                converged: true,
                iterations,
            };
        }
    }

    KeplerSolution {
        eccentric_anomaly_rad: ea,
        converged: false,
        iterations,
    }
}

/// Heliocentric state of a propagated minor body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricState {
    /// Position in the heliocentric ecliptic frame, AU.
    pub position_au: EclipticCartesian,
    /// Heliocentric distance, AU.
    pub radius_au: f64,
    /// False when the Kepler iteration did not converge; the position is
    /// the last iterate and the body should be flagged invisible.
    pub converged: bool,
}

/// Computes a heliocentric ecliptic position from one set of instantaneous
/// anomalies. Shared between minor-body propagation and the planetary
/// theory in [`crate::planets`].
pub fn heliocentric_position(
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
    arg_perihelion_deg: f64,
    mean_anomaly_deg: f64,
) -> HeliocentricState {
    let solution = solve_kepler(mean_anomaly_deg * DEG_TO_RAD, eccentricity);

    let e = eccentricity;
    let a = semi_major_axis_au;
    let (sin_ea, cos_ea) = libm::sincos(solution.eccentric_anomaly_rad);

    // Perifocal coordinates.
    let xp = a * (cos_ea - e);
    let yp = a * libm::sqrt(1.0 - e * e) * sin_ea;
    let true_anomaly = libm::atan2(yp, xp);
    let r = libm::sqrt(xp * xp + yp * yp);

    // Argument of latitude: argument of perihelion plus true anomaly.
    let u = arg_perihelion_deg * DEG_TO_RAD + true_anomaly;
    let node = ascending_node_deg * DEG_TO_RAD;
    let incl = inclination_deg * DEG_TO_RAD;

    let (sin_u, cos_u) = libm::sincos(u);
    let (sin_node, cos_node) = libm::sincos(node);
    let cos_incl = libm::cos(incl);
    let sin_incl = libm::sin(incl);

    let x = r * (cos_node * cos_u - sin_node * sin_u * cos_incl);
    let y = r * (sin_node * cos_u + cos_node * sin_u * cos_incl);
    let z = r * sin_u * sin_incl;

    HeliocentricState {
        position_au: EclipticCartesian::new(x, y, z),
        radius_au: r,
        converged: solution.converged,
    }
}

/// Propagates orbital elements to the given instant.
pub fn propagate_elements(elements: &OrbitalElements, jd: JulianDate) -> HeliocentricState {
    let dt_days = jd.value() - elements.epoch_jd;
    let mean_anomaly_deg = wrap_degrees(
        elements.mean_anomaly_deg + elements.mean_motion_deg_day * dt_days,
    );
    heliocentric_position(
        elements.semi_major_axis_au,
        elements.eccentricity,
        elements.inclination_deg,
        elements.ascending_node_deg,
        elements.arg_perihelion_deg,
        mean_anomaly_deg,
    )
}

/// Maps a heliocentric ecliptic position onto the scene frame.
///
/// The ecliptic frame is `z`-up while the scene is `y`-up; the axis swap is
/// `scene = (X, Z, −Y)`, followed by the AU→scene-unit scale.
pub fn heliocentric_to_scene(position_au: &EclipticCartesian, au_scale: f64) -> Vector3 {
    Vector3::new(
        position_au.x * au_scale,
        position_au.z * au_scale,
        -position_au.y * au_scale,
    )
}
