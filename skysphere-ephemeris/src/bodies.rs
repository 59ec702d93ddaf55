//! The ephemeris gateway: one call per body per instant.
//!
//! The scene pipeline asks for apparent geocentric coordinates and display
//! attributes; which analytic theory answers is an implementation detail of
//! this crate. A magnitude that cannot be computed comes back as `None` —
//! the body itself is never dropped.

use crate::frames::{ecliptic_to_equatorial, EclipticCartesian};
use crate::{moon, planets, sun};
use skysphere_core::{Equatorial, JulianDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The ten bodies the gateway serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolarSystemBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl SolarSystemBody {
    pub const ALL: [SolarSystemBody; 10] = [
        SolarSystemBody::Sun,
        SolarSystemBody::Moon,
        SolarSystemBody::Mercury,
        SolarSystemBody::Venus,
        SolarSystemBody::Mars,
        SolarSystemBody::Jupiter,
        SolarSystemBody::Saturn,
        SolarSystemBody::Uranus,
        SolarSystemBody::Neptune,
        SolarSystemBody::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolarSystemBody::Sun => "Sun",
            SolarSystemBody::Moon => "Moon",
            SolarSystemBody::Mercury => "Mercury",
            SolarSystemBody::Venus => "Venus",
            SolarSystemBody::Mars => "Mars",
            SolarSystemBody::Jupiter => "Jupiter",
            SolarSystemBody::Saturn => "Saturn",
            SolarSystemBody::Uranus => "Uranus",
            SolarSystemBody::Neptune => "Neptune",
            SolarSystemBody::Pluto => "Pluto",
        }
    }

    /// True for the planets proper (not the Sun or the Moon).
    pub fn is_planet(&self) -> bool {
        !matches!(self, SolarSystemBody::Sun | SolarSystemBody::Moon)
    }
}

/// Apparent geocentric state of one body at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ApparentBody {
    pub body: SolarSystemBody,
    pub equatorial: Equatorial,
    /// Geocentric distance, AU.
    pub distance_au: f64,
    /// Apparent visual magnitude; `None` when the computation degenerates.
    pub magnitude: Option<f64>,
    /// Lunar phase angle `[0, 360)`; present only for the Moon.
    pub phase_deg: Option<f64>,
}

/// Evaluates one body's apparent geocentric position and attributes.
pub fn apparent_body(body: SolarSystemBody, jd: JulianDate) -> ApparentBody {
    let t = jd.julian_centuries();
    match body {
        SolarSystemBody::Sun => {
            let geo = sun::geocentric_position(jd);
            let (equatorial, distance_au) = ecliptic_to_equatorial(&geo, t);
            ApparentBody {
                body,
                equatorial,
                distance_au,
                magnitude: Some(sun::SUN_MAGNITUDE),
                phase_deg: None,
            }
        }
        SolarSystemBody::Moon => {
            let geo = moon::geocentric_position(jd);
            let (equatorial, distance_au) = ecliptic_to_equatorial(&geo, t);
            let phase = moon::phase_angle_deg(jd);
            ApparentBody {
                body,
                equatorial,
                distance_au,
                magnitude: Some(moon::magnitude(phase)),
                phase_deg: Some(phase),
            }
        }
        SolarSystemBody::Mercury => planet_state(body, planets::Planet::Mercury, jd),
        SolarSystemBody::Venus => planet_state(body, planets::Planet::Venus, jd),
        SolarSystemBody::Mars => planet_state(body, planets::Planet::Mars, jd),
        SolarSystemBody::Jupiter => planet_state(body, planets::Planet::Jupiter, jd),
        SolarSystemBody::Saturn => planet_state(body, planets::Planet::Saturn, jd),
        SolarSystemBody::Uranus => planet_state(body, planets::Planet::Uranus, jd),
        SolarSystemBody::Neptune => planet_state(body, planets::Planet::Neptune, jd),
        SolarSystemBody::Pluto => planet_state(body, planets::Planet::Pluto, jd),
    }
}

fn planet_state(body: SolarSystemBody, planet: planets::Planet, jd: JulianDate) -> ApparentBody {
    let helio = planets::heliocentric_position(planet, jd);
    let geo = planets::geocentric_position(planet, jd);
    let (equatorial, distance_au) = ecliptic_to_equatorial(&geo, jd.julian_centuries());
    let sun_distance = planets::earth_heliocentric(jd).length();
    let magnitude = planets::apparent_magnitude(planet, helio.length(), distance_au, sun_distance);
    ApparentBody {
        body,
        equatorial,
        distance_au,
        magnitude,
        phase_deg: None,
    }
}

/// Earth's heliocentric ecliptic position, re-exported for minor-body
/// geocentric reductions.
pub fn earth_heliocentric(jd: JulianDate) -> EclipticCartesian {
    planets::earth_heliocentric(jd)
}
