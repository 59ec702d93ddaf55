//! Natural-satellite offsets from their parent planet.
//!
//! Two fidelity levels coexist and the API says which is which:
//!
//! - **Jupiter**: the four Galilean moons follow a circular-orbit
//!   mini-ephemeris — mean orbital longitudes advanced at the true periods,
//!   orbits taken in the ecliptic plane (Jupiter's equator is tilted 1.3°
//!   from it, invisible at marker scale). Configurations match reality well
//!   enough to identify which moon is which.
//! - **Everything else**: a static table of nominal separations and evenly
//!   spaced position angles. This is a schematic, not an ephemeris — the
//!   separations are typical values and the angles exist only to give each
//!   system a recognizable, stable shape. Consumers should label these
//!   views as schematic; [`MoonFidelity`] carries the tag.
//!
//! Offsets are reported on the sky plane in arcseconds (east and north,
//! relative to the parent's apparent position). The scene layer converts
//! them to coordinate offsets and re-projects moons slightly inside the
//! celestial sphere so they draw in front of the parent's marker.

use crate::bodies::SolarSystemBody;
use skysphere_core::constants::ARCSEC_PER_RAD;
use skysphere_core::JulianDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How trustworthy a moon's reported position is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoonFidelity {
    /// Position from an orbital model; configuration is real.
    Ephemeris,
    /// Canned separation and angle; shape is illustrative only.
    Schematic,
}

/// One natural satellite's on-sky offset from its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonOffset {
    pub name: &'static str,
    pub parent: SolarSystemBody,
    /// Eastward offset on the sky, arcseconds.
    pub east_arcsec: f64,
    /// Northward offset on the sky, arcseconds.
    pub north_arcsec: f64,
    pub magnitude: f64,
    pub fidelity: MoonFidelity,
}

/// Galilean orbit: semi-major axis (AU), period (days), mean longitude at
/// J2000 (degrees), visual magnitude.
struct GalileanOrbit {
    name: &'static str,
    semi_major_axis_au: f64,
    period_days: f64,
    longitude_j2000_deg: f64,
    magnitude: f64,
}

const GALILEAN_ORBITS: [GalileanOrbit; 4] = [
    GalileanOrbit {
        name: "Io",
        semi_major_axis_au: 0.002819,
        period_days: 1.769138,
        longitude_j2000_deg: 106.08,
        magnitude: 5.0,
    },
    GalileanOrbit {
        name: "Europa",
        semi_major_axis_au: 0.004486,
        period_days: 3.551181,
        longitude_j2000_deg: 175.73,
        magnitude: 5.3,
    },
    GalileanOrbit {
        name: "Ganymede",
        semi_major_axis_au: 0.007155,
        period_days: 7.154553,
        longitude_j2000_deg: 120.56,
        magnitude: 4.6,
    },
    GalileanOrbit {
        name: "Callisto",
        semi_major_axis_au: 0.012585,
        period_days: 16.689017,
        longitude_j2000_deg: 84.46,
        magnitude: 5.7,
    },
];

/// Schematic entry: nominal separation (arcsec), magnitude, position angle
/// (degrees, east of north).
struct SchematicMoon {
    name: &'static str,
    parent: SolarSystemBody,
    separation_arcsec: f64,
    magnitude: f64,
    position_angle_deg: f64,
}

const SCHEMATIC_MOONS: [SchematicMoon; 13] = [
    SchematicMoon { name: "Phobos", parent: SolarSystemBody::Mars, separation_arcsec: 25.0, magnitude: 11.8, position_angle_deg: 0.0 },
    SchematicMoon { name: "Deimos", parent: SolarSystemBody::Mars, separation_arcsec: 62.0, magnitude: 12.9, position_angle_deg: 180.0 },
    SchematicMoon { name: "Titan", parent: SolarSystemBody::Saturn, separation_arcsec: 197.0, magnitude: 8.4, position_angle_deg: 0.0 },
    SchematicMoon { name: "Rhea", parent: SolarSystemBody::Saturn, separation_arcsec: 76.0, magnitude: 9.7, position_angle_deg: 60.0 },
    SchematicMoon { name: "Iapetus", parent: SolarSystemBody::Saturn, separation_arcsec: 515.0, magnitude: 11.0, position_angle_deg: 120.0 },
    SchematicMoon { name: "Dione", parent: SolarSystemBody::Saturn, separation_arcsec: 61.0, magnitude: 10.4, position_angle_deg: 180.0 },
    SchematicMoon { name: "Tethys", parent: SolarSystemBody::Saturn, separation_arcsec: 53.0, magnitude: 10.2, position_angle_deg: 240.0 },
    SchematicMoon { name: "Enceladus", parent: SolarSystemBody::Saturn, separation_arcsec: 38.0, magnitude: 11.7, position_angle_deg: 300.0 },
    SchematicMoon { name: "Titania", parent: SolarSystemBody::Uranus, separation_arcsec: 33.0, magnitude: 13.9, position_angle_deg: 45.0 },
    SchematicMoon { name: "Oberon", parent: SolarSystemBody::Uranus, separation_arcsec: 44.0, magnitude: 14.1, position_angle_deg: 225.0 },
    SchematicMoon { name: "Ariel", parent: SolarSystemBody::Uranus, separation_arcsec: 14.0, magnitude: 14.3, position_angle_deg: 135.0 },
    SchematicMoon { name: "Triton", parent: SolarSystemBody::Neptune, separation_arcsec: 17.0, magnitude: 13.5, position_angle_deg: 90.0 },
    SchematicMoon { name: "Charon", parent: SolarSystemBody::Pluto, separation_arcsec: 0.9, magnitude: 16.8, position_angle_deg: 0.0 },
];

/// Computes the moon offsets for one parent at one instant.
///
/// `parent_distance_au` is the parent's geocentric distance, used to scale
/// orbital offsets to apparent arcseconds. Parents without modeled moons
/// (Sun, Moon, Mercury, Venus) return an empty list.
pub fn moon_offsets(
    parent: SolarSystemBody,
    jd: JulianDate,
    parent_distance_au: f64,
) -> Vec<MoonOffset> {
    match parent {
        SolarSystemBody::Jupiter => galilean_offsets(jd, parent_distance_au),
        SolarSystemBody::Mars
        | SolarSystemBody::Saturn
        | SolarSystemBody::Uranus
        | SolarSystemBody::Neptune
        | SolarSystemBody::Pluto => schematic_offsets(parent),
        _ => Vec::new(),
    }
}

fn galilean_offsets(jd: JulianDate, parent_distance_au: f64) -> Vec<MoonOffset> {
    if !(parent_distance_au.is_finite()) || parent_distance_au < 1.0 {
        return Vec::new();
    }
    let days = jd.days_since_j2000();
    GALILEAN_ORBITS
        .iter()
        .map(|orbit| {
            let longitude = (orbit.longitude_j2000_deg + 360.0 * days / orbit.period_days)
                .to_radians();
            // Orbit in the ecliptic plane seen nearly edge-on from Earth:
            // the along-track component becomes east-west elongation, the
            // line-of-sight component compresses to a small north-south
            // displacement (the orbits are inclined ~1-2° to our view).
            let (sin_l, cos_l) = libm::sincos(longitude);
            let scale_arcsec = orbit.semi_major_axis_au / parent_distance_au * ARCSEC_PER_RAD;
            MoonOffset {
                name: orbit.name,
                parent: SolarSystemBody::Jupiter,
                east_arcsec: scale_arcsec * sin_l,
                north_arcsec: scale_arcsec * cos_l * 0.05,
                magnitude: orbit.magnitude,
                fidelity: MoonFidelity::Ephemeris,
            }
        })
        .collect()
}

fn schematic_offsets(parent: SolarSystemBody) -> Vec<MoonOffset> {
    SCHEMATIC_MOONS
        .iter()
        .filter(|m| m.parent == parent)
        .map(|m| {
            let pa = m.position_angle_deg.to_radians();
            let (sin_pa, cos_pa) = libm::sincos(pa);
            MoonOffset {
                name: m.name,
                parent: m.parent,
                east_arcsec: m.separation_arcsec * sin_pa,
                north_arcsec: m.separation_arcsec * cos_pa,
                magnitude: m.magnitude,
                fidelity: MoonFidelity::Schematic,
            }
        })
        .collect()
}
