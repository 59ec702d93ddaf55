//! Scene-level queries: visibility counts and the initial view heuristic.

use crate::object::{BodyView, ProcessedStar};
use crate::Scene;
use skysphere_core::angle::wrap_degrees;
use skysphere_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use skysphere_core::Horizontal;
use skysphere_ephemeris::SolarSystemBody;

/// Stars brighter than this steer the initial view.
const VIEW_STAR_MAG_LIMIT: f64 = 3.0;
/// Fixed centroid weight for a planet above the horizon.
const PLANET_WEIGHT: f64 = 5.0;
/// Default view when nothing bright is up: due south, mid-sky.
const FALLBACK_VIEW: Horizontal = Horizontal {
    altitude_deg: 45.0,
    azimuth_deg: 180.0,
};

/// How many of each object class are currently above the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleCounts {
    pub stars: usize,
    pub bodies: usize,
    pub deep_sky: usize,
    pub satellites: usize,
    pub minor_bodies: usize,
    pub active_showers: usize,
}

/// Counts the objects above the horizon in one scene.
///
/// Bodies are counted by altitude, not by their `is_visible` flag — Solar
/// System bodies are always flagged visible by contract.
pub fn visible_counts(scene: &Scene) -> VisibleCounts {
    VisibleCounts {
        stars: scene.stars.iter().filter(|s| s.is_visible).count(),
        bodies: scene
            .bodies
            .iter()
            .filter(|b| b.altaz.is_above_horizon())
            .count(),
        deep_sky: scene.deep_sky.iter().filter(|d| d.is_visible).count(),
        satellites: scene.satellites.iter().filter(|s| s.is_visible).count(),
        minor_bodies: scene.minor_bodies.iter().filter(|m| m.is_visible).count(),
        active_showers: scene.meteor_showers.iter().filter(|s| s.is_active).count(),
    }
}

/// Picks the most rewarding initial view direction.
///
/// Brightness-weighted centroid of the visible bright stars
/// (weight `2.512^(3 − mag)`) plus every planet above the horizon at a
/// fixed weight, the Sun excluded. Azimuths are averaged on the unit
/// circle — a centroid straddling north must come out near 0°/360°, not
/// at the arithmetic-mean 180°. Altitude is clamped to `[20°, 70°]`.
pub fn best_initial_view(stars: &[ProcessedStar], bodies: &[BodyView]) -> Horizontal {
    let mut weight_sum = 0.0;
    let mut sin_sum = 0.0;
    let mut cos_sum = 0.0;
    let mut alt_sum = 0.0;

    for star in stars {
        if !star.is_visible || star.star.apparent_mag >= VIEW_STAR_MAG_LIMIT {
            continue;
        }
        let weight = libm::pow(2.512, VIEW_STAR_MAG_LIMIT - star.star.apparent_mag);
        let az = star.altaz.azimuth_deg * DEG_TO_RAD;
        sin_sum += weight * libm::sin(az);
        cos_sum += weight * libm::cos(az);
        alt_sum += weight * star.altaz.altitude_deg;
        weight_sum += weight;
    }

    for body in bodies {
        if body.body == SolarSystemBody::Sun || !body.altaz.is_above_horizon() {
            continue;
        }
        let az = body.altaz.azimuth_deg * DEG_TO_RAD;
        sin_sum += PLANET_WEIGHT * libm::sin(az);
        cos_sum += PLANET_WEIGHT * libm::cos(az);
        alt_sum += PLANET_WEIGHT * body.altaz.altitude_deg;
        weight_sum += PLANET_WEIGHT;
    }

    if weight_sum <= 0.0 {
        return FALLBACK_VIEW;
    }

    let azimuth = wrap_degrees(libm::atan2(sin_sum, cos_sum) * RAD_TO_DEG);
    let altitude = (alt_sum / weight_sum).clamp(20.0, 70.0);
    Horizontal::new(altitude, azimuth)
}
